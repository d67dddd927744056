//! Product editing panel and endpoint.

use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::html;

use crate::{
    Error,
    alert::Alert,
    coordinator::Coordinator,
    product::{
        ProductFormData, ProductId,
        list::{
            FormMode, ProductForm, ProductsState, enter_products_page, products_page_view,
            products_panel_view,
        },
    },
    session::Session,
};

/// Render the products panel with the form filled in with product `product_id`.
///
/// A plain browser request gets the whole products page, freshly mounted.
pub async fn get_edit_product_panel(
    Path(product_id): Path<ProductId>,
    HxRequest(is_htmx_request): HxRequest,
    State(state): State<ProductsState>,
    Extension(session): Extension<Session>,
) -> Response {
    if !is_htmx_request {
        enter_products_page(state.catalog.as_ref(), &session).await;
    }

    let screen = session.products_screen.lock().await;

    let Some(product) = screen.products().get(product_id) else {
        tracing::warn!("Product {product_id} is not on the products screen");

        return if is_htmx_request {
            Error::NotFound.into_alert_response()
        } else {
            Error::NotFound.into_response()
        };
    };

    let form_data = ProductFormData::from(product);
    let form = ProductForm {
        mode: FormMode::Edit(product_id),
        data: &form_data,
        error_message: "",
    };
    let panel = products_panel_view(&screen, &form, &state.pagination_config);

    if is_htmx_request {
        Html(panel.into_string()).into_response()
    } else {
        products_page_view(panel).into_response()
    }
}

/// Handle product update form submission.
pub async fn update_product_endpoint(
    Path(product_id): Path<ProductId>,
    State(state): State<ProductsState>,
    Extension(session): Extension<Session>,
    Form(form_data): Form<ProductFormData>,
) -> Response {
    let coordinator = Coordinator::for_session(state.catalog.clone(), &session);

    match coordinator.update_product(product_id, &form_data).await {
        Ok(product) => {
            let screen = session.products_screen.lock().await;
            let panel =
                products_panel_view(&screen, &ProductForm::empty(), &state.pagination_config);
            let alert = Alert::SuccessSimple {
                message: format!("Produit « {} » mis à jour", product.name),
            };

            Html(html! { (panel) (alert.into_oob_html()) }.into_string()).into_response()
        }
        Err(Error::Validation(error)) => {
            let screen = session.products_screen.lock().await;
            let error_message = error.to_string();
            let form = ProductForm {
                mode: FormMode::Edit(product_id),
                data: &form_data,
                error_message: &error_message,
            };

            Html(products_panel_view(&screen, &form, &state.pagination_config).into_string())
                .into_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating product {product_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
