//! Category creation endpoint.

use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    alert::Alert,
    category::{
        CategoryFormData,
        list::{CategoriesState, CategoryForm, FormMode, categories_panel_view},
    },
    coordinator::Coordinator,
    session::Session,
};

/// Handle the new category form.
///
/// Responds with the categories panel listing the new category last, or with
/// the submitted form and an error message if the name is blank.
pub async fn create_category_endpoint(
    State(state): State<CategoriesState>,
    Extension(session): Extension<Session>,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let coordinator = Coordinator::for_session(state.catalog.clone(), &session);

    match coordinator.create_category(&form_data).await {
        Ok(category) => {
            let screen = session.categories_screen.lock().await;
            let panel = categories_panel_view(&screen, &CategoryForm::empty());
            let alert = Alert::SuccessSimple {
                message: format!("Catégorie « {} » ajoutée", category.name),
            };

            Html(html! { (panel) (alert.into_oob_html()) }.into_string()).into_response()
        }
        Err(Error::Validation(error)) => {
            let screen = session.categories_screen.lock().await;
            let error_message = error.to_string();
            let form = CategoryForm {
                mode: FormMode::Create,
                data: &form_data,
                error_message: &error_message,
            };

            Html(categories_panel_view(&screen, &form).into_string()).into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");
            error.into_alert_response()
        }
    }
}
