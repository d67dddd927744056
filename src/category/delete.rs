//! Category deletion endpoint.

use axum::{
    Extension,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;

use crate::{
    alert::Alert,
    category::{
        CategoryId,
        list::{CategoriesState, CategoryForm, categories_panel_view},
    },
    coordinator::{Coordinator, DeleteOutcome, DeleteQuery},
    session::Session,
};

/// Delete a category and, locally, all of its products once the user has
/// confirmed it.
///
/// An unconfirmed request changes nothing and gets an empty response.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoriesState>,
    Extension(session): Extension<Session>,
    Query(query): Query<DeleteQuery>,
) -> Response {
    let coordinator = Coordinator::for_session(state.catalog.clone(), &session);

    match coordinator.delete_category(category_id, query.into()).await {
        Ok(DeleteOutcome::Deleted) => {
            let screen = session.categories_screen.lock().await;
            let panel = categories_panel_view(&screen, &CategoryForm::empty());
            let alert = Alert::Success {
                message: "Catégorie supprimée".to_owned(),
                details: "Ses produits ont aussi été retirés de la liste.".to_owned(),
            };

            Html(html! { (panel) (alert.into_oob_html()) }.into_string()).into_response()
        }
        Ok(DeleteOutcome::Declined) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            tracing::error!("Could not delete category {category_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_category_tests {
    use std::sync::Arc;

    use axum::{
        Extension,
        extract::{Path, Query, State},
        http::StatusCode,
        response::Response,
    };

    use crate::{
        category::{Category, CategoryName, list::CategoriesState},
        coordinator::DeleteQuery,
        session::Session,
        test_utils::{FakeCatalog, mounted_session, parse_fragment, product, select_one, text_of},
    };

    use super::delete_category_endpoint;

    fn catalog() -> Arc<FakeCatalog> {
        Arc::new(FakeCatalog::with_data(
            vec![
                Category {
                    id: 1,
                    name: CategoryName::new_unchecked("Fruits"),
                },
                Category {
                    id: 2,
                    name: CategoryName::new_unchecked("Boissons"),
                },
            ],
            vec![
                product(1, "Apple", 10.0, 1),
                product(2, "Banana", 5.0, 1),
                product(3, "Water", 1.0, 2),
            ],
        ))
    }

    async fn delete(catalog: &Arc<FakeCatalog>, session: &Session, confirmed: bool) -> Response {
        let state = CategoriesState {
            catalog: catalog.clone(),
        };

        delete_category_endpoint(
            Path(1),
            State(state),
            Extension(session.clone()),
            Query(DeleteQuery { confirmed }),
        )
        .await
    }

    #[tokio::test]
    async fn confirmed_delete_cascades_to_products() {
        let catalog = catalog();
        let session = mounted_session(&catalog).await;
        session.categories_screen.lock().await.select_category(1);

        let response = delete(&catalog, &session, true).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(catalog.call_count(), 1);
        let html = parse_fragment(response).await;
        let alert = select_one(&html, "#alert-container [role=alert]");
        assert!(text_of(alert).contains("Catégorie supprimée"));

        let screen = session.categories_screen.lock().await;
        let category_ids: Vec<_> = screen.categories().items().iter().map(|c| c.id).collect();
        assert_eq!(category_ids, [2]);
        let product_ids: Vec<_> = screen.products().iter().map(|p| p.id).collect();
        assert_eq!(product_ids, [3]);
        assert!(screen.selected_category().is_none());

        let products_screen = session.products_screen.lock().await;
        let product_ids: Vec<_> = products_screen
            .products()
            .items()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(product_ids, [3]);
    }

    #[tokio::test]
    async fn unconfirmed_delete_does_nothing() {
        let catalog = catalog();
        let session = mounted_session(&catalog).await;

        let response = delete(&catalog, &session, false).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(catalog.call_count(), 0);
        assert_eq!(session.categories_screen.lock().await.categories().items().len(), 2);
    }

    #[tokio::test]
    async fn failed_delete_keeps_category_and_products() {
        let catalog = catalog();
        let session = mounted_session(&catalog).await;
        catalog.fail_requests(true);

        let response = delete(&catalog, &session, true).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let screen = session.categories_screen.lock().await;
        assert_eq!(screen.categories().items().len(), 2);
        assert_eq!(screen.products().len(), 3);
    }
}
