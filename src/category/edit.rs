//! Renaming categories.

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
    category::{
        CategoryFormData, CategoryId,
        list::{
            CategoriesState, CategoryForm, FormMode, categories_page_view, categories_panel_view,
            enter_categories_page,
        },
    },
    coordinator::Coordinator,
    session::Session,
};

/// Render the categories panel with the category `category_id` replaced by
/// an inline rename form.
///
/// A plain browser request gets the whole categories page, freshly mounted.
pub async fn get_edit_category_panel(
    Path(category_id): Path<CategoryId>,
    HxRequest(is_htmx_request): HxRequest,
    State(state): State<CategoriesState>,
    Extension(session): Extension<Session>,
) -> Response {
    if !is_htmx_request {
        enter_categories_page(state.catalog.as_ref(), &session).await;
    }

    let screen = session.categories_screen.lock().await;

    let Some(category) = screen.categories().get(category_id) else {
        tracing::warn!("Category {category_id} is not on the categories screen");

        return if is_htmx_request {
            Error::NotFound.into_alert_response()
        } else {
            Error::NotFound.into_response()
        };
    };

    let form_data = CategoryFormData::from(category);
    let form = CategoryForm {
        mode: FormMode::Edit(category_id),
        data: &form_data,
        error_message: "",
    };
    let panel = categories_panel_view(&screen, &form);

    if is_htmx_request {
        Html(panel.into_string()).into_response()
    } else {
        categories_page_view(panel).into_response()
    }
}

/// Handle the inline rename form.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoriesState>,
    Extension(session): Extension<Session>,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let coordinator = Coordinator::for_session(state.catalog.clone(), &session);

    match coordinator.update_category(category_id, &form_data).await {
        Ok(category) => {
            let screen = session.categories_screen.lock().await;
            let panel = categories_panel_view(&screen, &CategoryForm::empty());
            let alert = Alert::SuccessSimple {
                message: format!("Catégorie « {} » mise à jour", category.name),
            };

            Html(html! { (panel) (alert.into_oob_html()) }.into_string()).into_response()
        }
        Err(Error::Validation(error)) => {
            let screen = session.categories_screen.lock().await;
            let error_message = error.to_string();
            let form = CategoryForm {
                mode: FormMode::Edit(category_id),
                data: &form_data,
                error_message: &error_message,
            };

            Html(categories_panel_view(&screen, &form).into_string()).into_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod edit_category_tests {
    use std::sync::Arc;

    use axum::{
        Extension, Form,
        extract::{Path, State},
        http::StatusCode,
        response::Response,
    };
    use axum_htmx::HxRequest;

    use crate::{
        category::{Category, CategoryFormData, CategoryName, list::CategoriesState},
        endpoints,
        session::Session,
        test_utils::{
            FakeCatalog, assert_form_target, form_error, input_value, parse_fragment, parse_page,
            select_one, submit_label,
        },
        view_model::DEFAULT_PAGE_SIZE,
    };

    use super::{get_edit_category_panel, update_category_endpoint};

    fn state() -> CategoriesState {
        let catalog = FakeCatalog::with_data(
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
            vec![],
        );

        CategoriesState {
            catalog: Arc::new(catalog),
        }
    }

    async fn edit_page(state: &CategoriesState, session: &Session, category_id: i64) -> Response {
        get_edit_category_panel(
            Path(category_id),
            HxRequest(false),
            State(state.clone()),
            Extension(session.clone()),
        )
        .await
    }

    async fn rename(state: &CategoriesState, session: &Session, name: &str) -> Response {
        update_category_endpoint(
            Path(1),
            State(state.clone()),
            Extension(session.clone()),
            Form(CategoryFormData {
                name: name.to_owned(),
            }),
        )
        .await
    }

    #[tokio::test]
    async fn edit_page_shows_inline_form() {
        let session = Session::new(DEFAULT_PAGE_SIZE);

        let response = edit_page(&state(), &session, 2).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_page(response).await;
        let form = select_one(&html, "li form");
        assert_form_target(
            form,
            "hx-put",
            &endpoints::format_endpoint(endpoints::PUT_CATEGORY, 2),
        );
        assert_eq!(input_value(form, "name"), "Boissons");
        assert_eq!(submit_label(form), "Enregistrer");
    }

    #[tokio::test]
    async fn edit_unknown_category_is_not_found() {
        let session = Session::new(DEFAULT_PAGE_SIZE);

        let response = edit_page(&state(), &session, 9).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_renames_category_in_place() {
        let state = state();
        let session = Session::new(DEFAULT_PAGE_SIZE);
        edit_page(&state, &session, 1).await;

        let response = rename(&state, &session, "Fruits secs").await;

        assert_eq!(response.status(), StatusCode::OK);
        let screen = session.categories_screen.lock().await;
        let names: Vec<_> = screen
            .categories()
            .items()
            .iter()
            .map(|category| category.name.to_string())
            .collect();
        assert_eq!(names, ["Fruits secs", "Boissons"]);
    }

    #[tokio::test]
    async fn blank_rename_keeps_inline_form_open() {
        let state = state();
        let session = Session::new(DEFAULT_PAGE_SIZE);
        edit_page(&state, &session, 1).await;

        let response = rename(&state, &session, "").await;

        let html = parse_fragment(response).await;
        assert_eq!(form_error(select_one(&html, "li form")), "Le nom est requis.");
    }
}
