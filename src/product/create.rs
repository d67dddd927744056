//! Product creation endpoint.

use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    alert::Alert,
    coordinator::Coordinator,
    product::{
        ProductFormData,
        list::{FormMode, ProductForm, ProductsState, products_panel_view},
    },
    session::Session,
};

/// Handle product creation form submission.
///
/// Responds with the products panel, which lists the new product, or with
/// the submitted form and an error message if the form is incomplete.
pub async fn create_product_endpoint(
    State(state): State<ProductsState>,
    Extension(session): Extension<Session>,
    Form(form_data): Form<ProductFormData>,
) -> Response {
    let coordinator = Coordinator::for_session(state.catalog.clone(), &session);

    match coordinator.create_product(&form_data).await {
        Ok(product) => {
            let screen = session.products_screen.lock().await;
            let panel =
                products_panel_view(&screen, &ProductForm::empty(), &state.pagination_config);
            let alert = Alert::SuccessSimple {
                message: format!("Produit « {} » ajouté", product.name),
            };

            Html(html! { (panel) (alert.into_oob_html()) }.into_string()).into_response()
        }
        Err(Error::Validation(error)) => {
            let screen = session.products_screen.lock().await;
            let error_message = error.to_string();
            let form = ProductForm {
                mode: FormMode::Create,
                data: &form_data,
                error_message: &error_message,
            };

            Html(products_panel_view(&screen, &form, &state.pagination_config).into_string())
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a product: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod create_product_endpoint_tests {
    use std::sync::Arc;

    use axum::{Extension, Form, extract::State, http::StatusCode, response::Response};

    use crate::{
        category::{Category, CategoryName},
        pagination::PaginationConfig,
        product::{ProductFormData, list::ProductsState},
        session::Session,
        test_utils::{
            FakeCatalog, find_form, form_error, input_value, mounted_session, parse_fragment,
            select_one, text_of,
        },
    };

    use super::create_product_endpoint;

    fn catalog() -> Arc<FakeCatalog> {
        Arc::new(FakeCatalog::with_data(
            vec![Category {
                id: 1,
                name: CategoryName::new_unchecked("Fruits"),
            }],
            vec![],
        ))
    }

    fn form(name: &str, price: &str) -> ProductFormData {
        ProductFormData {
            name: name.to_owned(),
            description: "Jaune".to_owned(),
            price: price.to_owned(),
            category_id: "1".to_owned(),
        }
    }

    async fn create(catalog: &Arc<FakeCatalog>, session: &Session, form: ProductFormData) -> Response {
        let state = ProductsState {
            catalog: catalog.clone(),
            pagination_config: PaginationConfig::default(),
        };

        create_product_endpoint(State(state), Extension(session.clone()), Form(form)).await
    }

    #[tokio::test]
    async fn can_create_product() {
        let catalog = catalog();
        let session = mounted_session(&catalog).await;

        let response = create(&catalog, &session, form("Banana", "5")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(catalog.call_count(), 1);
        assert_eq!(session.products_screen.lock().await.products().items().len(), 1);

        let html = parse_fragment(response).await;
        let alert = select_one(&html, "#alert-container [role=alert]");
        assert!(text_of(alert).contains("Banana"));
    }

    #[tokio::test]
    async fn create_product_fails_on_invalid_price() {
        let catalog = catalog();
        let session = mounted_session(&catalog).await;

        let response = create(&catalog, &session, form("Banana", "abc")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(catalog.call_count(), 0);
        assert!(session.products_screen.lock().await.products().items().is_empty());

        let html = parse_fragment(response).await;
        let form = find_form(&html);
        assert_eq!(form_error(form), "Le prix doit être un nombre.");
        assert_eq!(input_value(form, "name"), "Banana");
    }

    #[tokio::test]
    async fn create_product_shows_alert_on_remote_failure() {
        let catalog = catalog();
        let session = mounted_session(&catalog).await;
        catalog.fail_requests(true);

        let response = create(&catalog, &session, form("Banana", "5")).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(session.products_screen.lock().await.products().items().is_empty());
    }
}
