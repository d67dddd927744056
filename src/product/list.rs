//! Products page: the product form, the search and sort controls, and the
//! paginated product table.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE,
        FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, edit_delete_action_links,
        format_price, load_error_view, loading_view,
    },
    navigation::NavBar,
    pagination::{PaginationConfig, pagination_view},
    product::{Product, ProductFormData, ProductId, ProductsScreen, mount_products_screen},
    remote::CatalogApi,
    screen::{LoadState, SETTLE_TIMEOUT, lock_when_settled},
    session::Session,
    view_model::SortKey,
};

const PANEL_ID: &str = "products-panel";
const PANEL_TARGET: &str = "#products-panel";
const TABLE_ID: &str = "products-table";
const TABLE_TARGET: &str = "#products-table";

/// The state needed for the products page and its endpoints.
#[derive(Clone)]
pub struct ProductsState {
    pub catalog: Arc<dyn CatalogApi>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ProductsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            catalog: state.catalog.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Changes to the product list's view state. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductsTableQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

/// Whether the product form creates a product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormMode {
    Create,
    Edit(ProductId),
}

/// The product form as it should be rendered.
pub(super) struct ProductForm<'a> {
    pub mode: FormMode,
    pub data: &'a ProductFormData,
    pub error_message: &'a str,
}

impl ProductForm<'_> {
    pub(super) fn empty() -> ProductForm<'static> {
        static EMPTY: ProductFormData = ProductFormData {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category_id: String::new(),
        };

        ProductForm {
            mode: FormMode::Create,
            data: &EMPTY,
            error_message: "",
        }
    }
}

/// Mount the session's products screen, leaving the categories page.
pub(super) async fn enter_products_page(catalog: &dyn CatalogApi, session: &Session) {
    session.categories_screen.lock().await.tear_down();
    mount_products_screen(&session.products_screen, catalog).await;
}

/// Mount the products screen and render the products page.
pub async fn get_products_page(
    State(state): State<ProductsState>,
    Extension(session): Extension<Session>,
) -> Response {
    enter_products_page(state.catalog.as_ref(), &session).await;

    let screen = session.products_screen.lock().await;
    let panel = products_panel_view(&screen, &ProductForm::empty(), &state.pagination_config);

    products_page_view(panel).into_response()
}

/// Render the products panel once the screen has finished loading.
pub async fn get_products_panel(
    State(state): State<ProductsState>,
    Extension(session): Extension<Session>,
) -> Response {
    let screen = lock_when_settled(&session.products_screen, SETTLE_TIMEOUT).await;

    Html(
        products_panel_view(&screen, &ProductForm::empty(), &state.pagination_config)
            .into_string(),
    )
    .into_response()
}

/// Apply search, sort and page changes and render the product table.
pub async fn get_products_table(
    State(state): State<ProductsState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ProductsTableQuery>,
) -> Response {
    let mut screen = session.products_screen.lock().await;

    if let Some(search) = &query.search {
        screen.set_search_term(search);
    }

    if let Some(sort) = query.sort {
        screen.set_sort_key(sort);
    }

    if let Some(page) = query.page {
        screen.set_page(page);
    }

    Html(products_table_view(&screen, &state.pagination_config).into_string()).into_response()
}

pub(super) fn products_page_view(panel: Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::PRODUCTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-4"
            {
                h1 class="text-2xl font-bold mb-4" { "Liste des Produits" }

                (panel)
            }
        }
    };

    base("Produits", &content)
}

pub(super) fn products_panel_view(
    screen: &ProductsScreen,
    form: &ProductForm<'_>,
    pagination_config: &PaginationConfig,
) -> Markup {
    match screen.load_state() {
        LoadState::Loading => loading_view(PANEL_ID, endpoints::PRODUCTS_PANEL),
        LoadState::Failed(message) => load_error_view(PANEL_ID, message),
        LoadState::Ready => html! {
            div id=(PANEL_ID) class="space-y-6"
            {
                div class=(FORM_CONTAINER_STYLE)
                {
                    (product_form_view(screen, form))
                }

                (list_controls_view(screen))

                (products_table_view(screen, pagination_config))
            }
        },
    }
}

fn product_form_view(screen: &ProductsScreen, form: &ProductForm<'_>) -> Markup {
    let (hx_post, hx_put, submit_text) = match form.mode {
        FormMode::Create => (Some(endpoints::POST_PRODUCT.to_owned()), None, "Ajouter le produit"),
        FormMode::Edit(id) => (
            None,
            Some(endpoints::format_endpoint(endpoints::PUT_PRODUCT, id)),
            "Mettre à jour le produit",
        ),
    };
    let data = form.data;

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target=(PANEL_TARGET)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Nom" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Nom du produit"
                    value=(data.name)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="Description du produit"
                    value=(data.description)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="price" class=(FORM_LABEL_STYLE) { "Prix" }

                input
                    id="price"
                    type="text"
                    inputmode="decimal"
                    name="price"
                    placeholder="0.00"
                    value=(data.price)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Catégorie" }

                select
                    id="category_id"
                    name="category_id"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[data.category_id.is_empty()]
                    {
                        "Choisir une catégorie"
                    }

                    @for category in screen.categories() {
                        @let value = category.id.to_string();

                        option value=(value) selected[value == data.category_id]
                        {
                            (category.name)
                        }
                    }
                }
            }

            @if !form.error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (form.error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }

            @if matches!(form.mode, FormMode::Edit(_)) {
                button
                    type="button"
                    hx-get=(endpoints::PRODUCTS_PANEL)
                    hx-target=(PANEL_TARGET)
                    hx-swap="outerHTML"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Annuler"
                }
            }
        }
    }
}

fn list_controls_view(screen: &ProductsScreen) -> Markup {
    let products = screen.products();

    html! {
        div class="flex flex-wrap items-center gap-4"
        {
            input
                type="search"
                name="search"
                aria-label="Rechercher un produit"
                placeholder="Rechercher un produit..."
                value=(products.search_term())
                hx-get=(endpoints::PRODUCTS_TABLE)
                hx-trigger="input changed delay:300ms, search"
                hx-target=(TABLE_TARGET)
                hx-swap="outerHTML"
                class=(FORM_TEXT_INPUT_STYLE);

            div class="flex items-center gap-2"
            {
                label for="sort" class="mr-2 font-medium" { "Trier par :" }

                select
                    id="sort"
                    name="sort"
                    hx-get=(endpoints::PRODUCTS_TABLE)
                    hx-trigger="change"
                    hx-target=(TABLE_TARGET)
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for sort_key in [SortKey::Price, SortKey::Name] {
                        option
                            value=(sort_key.as_query_value())
                            selected[sort_key == products.sort_key()]
                        {
                            (sort_key.label())
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn products_table_view(
    screen: &ProductsScreen,
    pagination_config: &PaginationConfig,
) -> Markup {
    let products = screen.products();

    let content = match screen.load_state() {
        LoadState::Loading => html! { div class="text-center mt-4" { "Chargement..." } },
        LoadState::Failed(message) => html! { div class="text-center text-red-500" { (message) } },
        LoadState::Ready => {
            let page = products.paginated();

            html! {
                @if page.is_empty() {
                    div class="text-gray-500" { "Aucun produit disponible." }
                } @else {
                    (product_table(screen, &page))
                }

                (pagination_view(
                    products.current_page(),
                    products.total_pages(),
                    pagination_config.max_pages,
                    TABLE_TARGET,
                    |page| table_url(&ProductsTableQuery {
                        page: Some(page),
                        ..Default::default()
                    }),
                ))
            }
        }
    };

    html! {
        div id=(TABLE_ID) { (content) }
    }
}

fn product_table(screen: &ProductsScreen, products: &[&Product]) -> Markup {
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
                    th scope="col" class=(TABLE_CELL_STYLE) { "Catégorie" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                }
            }

            tbody
            {
                @for product in products {
                    (product_row(screen, product))
                }
            }
        }
    }
}

fn product_row(screen: &ProductsScreen, product: &Product) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_PRODUCT_VIEW, product.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_PRODUCT, product.id);
    let confirm_message = format!(
        "Voulez-vous vraiment supprimer le produit '{}' ?",
        product.name
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-product-id=(product.id)
        {
            td class=(TABLE_CELL_STYLE) { (product.name) }
            td class=(TABLE_CELL_STYLE) { (product.description) }
            td class={ (TABLE_CELL_STYLE) " tabular-nums whitespace-nowrap" }
            {
                (format_price(product.price))
            }
            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(category_name) = screen.category_name(product) {
                    span class=(CATEGORY_BADGE_STYLE) { (category_name) }
                } @else {
                    span class="text-gray-400 dark:text-gray-500" { "-" }
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (edit_delete_action_links(&edit_url, &delete_url, &confirm_message, PANEL_TARGET))
                }
            }
        }
    }
}

fn table_url(query: &ProductsTableQuery) -> String {
    match serde_urlencoded::to_string(query) {
        Ok(query) if !query.is_empty() => format!("{}?{query}", endpoints::PRODUCTS_TABLE),
        Ok(_) => endpoints::PRODUCTS_TABLE.to_owned(),
        Err(error) => {
            tracing::error!("Could not encode the products table query {query:?}: {error}");
            endpoints::PRODUCTS_TABLE.to_owned()
        }
    }
}
