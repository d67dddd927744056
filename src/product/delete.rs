//! Product deletion endpoint.

use axum::{
    Extension,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;

use crate::{
    alert::Alert,
    coordinator::{Coordinator, DeleteOutcome, DeleteQuery},
    product::{
        ProductId,
        list::{ProductForm, ProductsState, products_panel_view},
    },
    session::Session,
};

/// Delete a product once the user has confirmed it.
///
/// An unconfirmed request changes nothing and gets an empty response.
pub async fn delete_product_endpoint(
    Path(product_id): Path<ProductId>,
    State(state): State<ProductsState>,
    Extension(session): Extension<Session>,
    Query(query): Query<DeleteQuery>,
) -> Response {
    let coordinator = Coordinator::for_session(state.catalog.clone(), &session);

    match coordinator.delete_product(product_id, query.into()).await {
        Ok(DeleteOutcome::Deleted) => {
            let screen = session.products_screen.lock().await;
            let panel =
                products_panel_view(&screen, &ProductForm::empty(), &state.pagination_config);
            let alert = Alert::SuccessSimple {
                message: "Produit supprimé".to_owned(),
            };

            Html(html! { (panel) (alert.into_oob_html()) }.into_string()).into_response()
        }
        Ok(DeleteOutcome::Declined) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            tracing::error!("Could not delete product {product_id}: {error}");
            error.into_alert_response()
        }
    }
}
