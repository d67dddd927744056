//! Categories page: the new category form and the category list, where
//! clicking a category shows its products.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    category::{
        CategoriesScreen, Category, CategoryFormData, CategoryId, mount_categories_screen,
    },
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, edit_delete_action_links, format_price, load_error_view,
        loading_view,
    },
    navigation::NavBar,
    product::Product,
    remote::CatalogApi,
    screen::{LoadState, SETTLE_TIMEOUT, lock_when_settled},
    session::Session,
};

const PANEL_ID: &str = "categories-panel";
const PANEL_TARGET: &str = "#categories-panel";

/// The state needed for the categories page and its endpoints.
#[derive(Clone)]
pub struct CategoriesState {
    pub catalog: Arc<dyn CatalogApi>,
}

impl FromRef<AppState> for CategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            catalog: state.catalog.clone(),
        }
    }
}

/// Whether the submitted form is the new category form or the inline form
/// renaming an existing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormMode {
    Create,
    Edit(CategoryId),
}

/// The category form as it should be rendered.
pub(super) struct CategoryForm<'a> {
    pub mode: FormMode,
    pub data: &'a CategoryFormData,
    pub error_message: &'a str,
}

impl CategoryForm<'_> {
    pub(super) fn empty() -> CategoryForm<'static> {
        static EMPTY: CategoryFormData = CategoryFormData {
            name: String::new(),
        };

        CategoryForm {
            mode: FormMode::Create,
            data: &EMPTY,
            error_message: "",
        }
    }
}

/// Mount the session's categories screen, leaving the products page.
pub(super) async fn enter_categories_page(catalog: &dyn CatalogApi, session: &Session) {
    session.products_screen.lock().await.tear_down();
    mount_categories_screen(&session.categories_screen, catalog).await;
}

/// Mount the categories screen and render the categories page.
pub async fn get_categories_page(
    State(state): State<CategoriesState>,
    Extension(session): Extension<Session>,
) -> Response {
    enter_categories_page(state.catalog.as_ref(), &session).await;

    let screen = session.categories_screen.lock().await;
    let panel = categories_panel_view(&screen, &CategoryForm::empty());

    categories_page_view(panel).into_response()
}

/// Render the categories panel once the screen has finished loading.
pub async fn get_categories_panel(Extension(session): Extension<Session>) -> Response {
    let screen = lock_when_settled(&session.categories_screen, SETTLE_TIMEOUT).await;

    Html(categories_panel_view(&screen, &CategoryForm::empty()).into_string()).into_response()
}

/// Show the products of a category, or hide them if it was already selected.
pub async fn select_category_endpoint(
    Path(category_id): Path<CategoryId>,
    Extension(session): Extension<Session>,
) -> Response {
    let mut screen = session.categories_screen.lock().await;
    let selected = screen.select_category(category_id);
    tracing::debug!("Category selection is now {selected:?}");

    Html(categories_panel_view(&screen, &CategoryForm::empty()).into_string()).into_response()
}

pub(super) fn categories_page_view(panel: Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-3xl space-y-4"
            {
                h1 class="text-2xl font-bold mb-4" { "Liste des Catégories" }

                (panel)
            }
        }
    };

    base("Catégories", &content)
}

pub(super) fn categories_panel_view(screen: &CategoriesScreen, form: &CategoryForm<'_>) -> Markup {
    match screen.load_state() {
        LoadState::Loading => loading_view(PANEL_ID, endpoints::CATEGORIES_PANEL),
        LoadState::Failed(message) => load_error_view(PANEL_ID, message),
        LoadState::Ready => {
            let empty_form = CategoryForm::empty();
            let create_form = match form.mode {
                FormMode::Create => form,
                FormMode::Edit(_) => &empty_form,
            };

            html! {
                div id=(PANEL_ID) class="space-y-6"
                {
                    div class=(FORM_CONTAINER_STYLE)
                    {
                        (create_category_form_view(create_form))
                    }

                    ul class="space-y-4"
                    {
                        @for category in screen.categories().items() {
                            (category_item_view(screen, category, form))
                        }
                    }
                }
            }
        }
    }
}

fn create_category_form_view(form: &CategoryForm<'_>) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_CATEGORY)
            hx-target=(PANEL_TARGET)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-2"
        {
            input
                type="text"
                name="name"
                aria-label="Nom de la catégorie"
                placeholder="Nom de la nouvelle catégorie"
                value=(form.data.name)
                required
                class=(FORM_TEXT_INPUT_STYLE);

            @if !form.error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (form.error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Ajouter la Catégorie" }
        }
    }
}

fn category_item_view(
    screen: &CategoriesScreen,
    category: &Category,
    form: &CategoryForm<'_>,
) -> Markup {
    let is_selected = screen.selected_category().map(|selected| selected.id) == Some(category.id);

    html! {
        li
            class="p-4 bg-gray-100 dark:bg-gray-800 rounded shadow hover:bg-gray-200 dark:hover:bg-gray-700"
            data-category-id=(category.id)
        {
            @if form.mode == FormMode::Edit(category.id) {
                (edit_category_form_view(category.id, form))
            } @else {
                div class="flex justify-between items-center"
                {
                    button
                        type="button"
                        hx-post=(endpoints::format_endpoint(endpoints::SELECT_CATEGORY, category.id))
                        hx-target=(PANEL_TARGET)
                        hx-swap="outerHTML"
                        aria-expanded=(is_selected)
                        class="text-lg font-medium cursor-pointer"
                    {
                        (category.name)
                    }

                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id),
                            &endpoints::format_endpoint(endpoints::DELETE_CATEGORY, category.id),
                            "Voulez-vous vraiment supprimer cette catégorie et tous ses produits ?",
                            PANEL_TARGET,
                        ))
                    }
                }
            }

            @if is_selected {
                div class="mt-4"
                {
                    (selected_products_view(&screen.selected_products()))
                }
            }
        }
    }
}

fn edit_category_form_view(category_id: CategoryId, form: &CategoryForm<'_>) -> Markup {
    html! {
        form
            hx-put=(endpoints::format_endpoint(endpoints::PUT_CATEGORY, category_id))
            hx-target=(PANEL_TARGET)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="flex flex-wrap items-center gap-2"
        {
            input
                type="text"
                name="name"
                aria-label="Nom de la catégorie"
                value=(form.data.name)
                required
                class=(FORM_TEXT_INPUT_STYLE);

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Enregistrer" }

            button
                type="button"
                hx-get=(endpoints::CATEGORIES_PANEL)
                hx-target=(PANEL_TARGET)
                hx-swap="outerHTML"
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Annuler"
            }

            @if !form.error_message.is_empty() {
                p class="w-full text-red-600 dark:text-red-400" { (form.error_message) }
            }
        }
    }
}

fn selected_products_view(products: &[&Product]) -> Markup {
    if products.is_empty() {
        return html! {
            div class="text-gray-500" { "Aucun produit disponible." }
        };
    }

    html! {
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Nom" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Prix" }
                }
            }

            tbody
            {
                @for product in products {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (product.name) }
                        td class=(TABLE_CELL_STYLE) { (product.description) }
                        td class={ (TABLE_CELL_STYLE) " tabular-nums whitespace-nowrap" }
                        {
                            (format_price(product.price))
                        }
                    }
                }
            }
        }
    }
}
