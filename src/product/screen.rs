//! The products screen: the product list with its view state, plus the
//! categories that populate the product form's selector.

use tokio::sync::{Mutex, watch};

use crate::{
    category::{Category, CategoryId},
    product::{Product, ProductId},
    remote::{CatalogApi, RemoteError},
    screen::{LoadState, MountGeneration, MountTicket, ObservableScreen, Revision},
    view_model::{ListViewModel, Listable, SortKey},
};

/// The message shown when the products screen could not be loaded.
pub const PRODUCTS_LOAD_ERROR: &str = "Erreur lors de la récupération des produits";

/// The state behind the products page.
#[derive(Debug)]
pub struct ProductsScreen {
    load_state: LoadState,
    products: ListViewModel<Product>,
    categories: Vec<Category>,
    page_size: usize,
    mount: MountGeneration,
    revision: Revision,
}

impl ProductsScreen {
    /// Create a screen that has not been mounted yet.
    pub fn new(page_size: usize) -> Self {
        Self {
            load_state: LoadState::Loading,
            products: ListViewModel::new(page_size),
            categories: Vec::new(),
            page_size,
            mount: MountGeneration::default(),
            revision: Revision::default(),
        }
    }

    /// Whether the screen is loading, ready or failed.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// The product list and its view state.
    pub fn products(&self) -> &ListViewModel<Product> {
        &self.products
    }

    /// The categories offered by the product form.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The name of `product`'s category.
    ///
    /// Prefers the fetched category list, which reflects renames made since
    /// the products were fetched, over the name embedded in the product.
    pub fn category_name<'a>(&'a self, product: &'a Product) -> Option<&'a str> {
        self.categories
            .iter()
            .find(|category| product.category_id == Some(category.id))
            .map(|category| category.name.as_ref())
            .or(product.category_name.as_deref())
    }

    /// Start a new mount: reset the view state and enter [LoadState::Loading].
    pub fn begin_mount(&mut self) -> MountTicket {
        self.load_state = LoadState::Loading;
        self.products = ListViewModel::new(self.page_size);
        self.revision.bump();

        self.mount.begin()
    }

    /// Store the results of the fetches started with `ticket`.
    ///
    /// Returns `false` if the results were discarded because the screen was
    /// remounted or torn down in the meantime.
    pub fn finish_mount(
        &mut self,
        ticket: MountTicket,
        result: Result<(Vec<Product>, Vec<Category>), RemoteError>,
    ) -> bool {
        if !self.mount.is_current(ticket) {
            tracing::debug!("Discarding products fetched for a stale mount of the products screen");
            return false;
        }

        match result {
            Ok((products, categories)) => {
                self.products.set_items(products);
                self.categories = categories;
                self.load_state = LoadState::Ready;
            }
            Err(error) => {
                tracing::error!("Could not load the products screen: {error}");
                self.load_state = LoadState::Failed(PRODUCTS_LOAD_ERROR.to_owned());
            }
        }

        self.revision.bump();
        true
    }

    /// Stop accepting the results of pending fetches.
    pub fn tear_down(&mut self) {
        self.mount.tear_down();
    }

    /// Change the search term, going back to the first page.
    pub fn set_search_term(&mut self, search_term: &str) {
        self.products.set_search_term(search_term);
        self.revision.bump();
    }

    /// Change the sort key.
    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.products.set_sort_key(sort_key);
        self.revision.bump();
    }

    /// Go to `page`.
    pub fn set_page(&mut self, page: usize) {
        self.products.set_page(page);
        self.revision.bump();
    }

    pub(crate) fn product_created(&mut self, product: Product) -> bool {
        self.when_ready(|screen| screen.products.push(product))
    }

    pub(crate) fn product_updated(&mut self, product: Product) -> bool {
        let id = product.id();

        self.when_ready(|screen| {
            if !screen.products.replace(product) {
                tracing::warn!("Updated product {id} is not on the products screen");
            }
        })
    }

    pub(crate) fn product_deleted(&mut self, id: ProductId) -> bool {
        self.when_ready(|screen| {
            screen.products.remove(id);
        })
    }

    pub(crate) fn category_created(&mut self, category: Category) -> bool {
        self.when_ready(|screen| screen.categories.push(category))
    }

    pub(crate) fn category_updated(&mut self, category: Category) -> bool {
        self.when_ready(|screen| {
            if let Some(existing) = screen
                .categories
                .iter_mut()
                .find(|existing| existing.id == category.id)
            {
                *existing = category;
            }
        })
    }

    /// Remove the category from the selector along with its products.
    pub(crate) fn category_deleted(&mut self, id: CategoryId) -> bool {
        self.when_ready(|screen| {
            screen.categories.retain(|category| category.id != id);
            screen
                .products
                .retain(|product| product.category_id != Some(id));
        })
    }

    fn when_ready(&mut self, apply: impl FnOnce(&mut Self)) -> bool {
        if !self.load_state.is_ready() {
            return false;
        }

        apply(self);
        self.revision.bump();
        true
    }
}

impl ObservableScreen for ProductsScreen {
    fn is_settled(&self) -> bool {
        self.load_state != LoadState::Loading || !self.mount.is_active()
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

/// Fetch the products and categories and store them in `screen`.
///
/// The lock is released while the requests are in flight. Returns the load
/// state after the fetches finished.
pub async fn mount_products_screen(
    screen: &Mutex<ProductsScreen>,
    catalog: &dyn CatalogApi,
) -> LoadState {
    let ticket = screen.lock().await.begin_mount();

    let result = tokio::try_join!(catalog.products(), catalog.categories());

    let mut screen = screen.lock().await;
    screen.finish_mount(ticket, result);
    screen.load_state().clone()
}
