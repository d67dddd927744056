//! The categories screen: the category list plus the products of the
//! selected category.

use tokio::sync::{Mutex, watch};

use crate::{
    category::{Category, CategoryId},
    product::{Product, ProductId},
    remote::{CatalogApi, RemoteError},
    screen::{LoadState, MountGeneration, MountTicket, ObservableScreen, Revision},
    view_model::{ListViewModel, Listable},
};

/// The message shown when the categories screen could not be loaded.
pub const CATEGORIES_LOAD_ERROR: &str = "Erreur lors de la récupération des données";

/// The state behind the categories page.
#[derive(Debug)]
pub struct CategoriesScreen {
    load_state: LoadState,
    categories: ListViewModel<Category>,
    products: Vec<Product>,
    selected: Option<CategoryId>,
    page_size: usize,
    mount: MountGeneration,
    revision: Revision,
}

impl CategoriesScreen {
    /// Create a screen that has not been mounted yet.
    pub fn new(page_size: usize) -> Self {
        Self {
            load_state: LoadState::Loading,
            categories: ListViewModel::new(page_size),
            products: Vec::new(),
            selected: None,
            page_size,
            mount: MountGeneration::default(),
            revision: Revision::default(),
        }
    }

    /// Whether the screen is loading, ready or failed.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// The category list.
    pub fn categories(&self) -> &ListViewModel<Category> {
        &self.categories
    }

    /// Every product fetched with the categories.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The category whose products are shown, if any.
    pub fn selected_category(&self) -> Option<&Category> {
        self.selected.and_then(|id| self.categories.get(id))
    }

    /// The products of the selected category, in the order they were fetched.
    ///
    /// Empty when no category is selected.
    pub fn selected_products(&self) -> Vec<&Product> {
        match self.selected {
            Some(id) => self
                .products
                .iter()
                .filter(|product| product.category_id == Some(id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Start a new mount: clear the selection and enter [LoadState::Loading].
    pub fn begin_mount(&mut self) -> MountTicket {
        self.load_state = LoadState::Loading;
        self.categories = ListViewModel::new(self.page_size);
        self.selected = None;
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
        result: Result<(Vec<Category>, Vec<Product>), RemoteError>,
    ) -> bool {
        if !self.mount.is_current(ticket) {
            tracing::debug!("Discarding data fetched for a stale mount of the categories screen");
            return false;
        }

        match result {
            Ok((categories, products)) => {
                self.categories.set_items(categories);
                self.products = products;
                self.load_state = LoadState::Ready;
            }
            Err(error) => {
                tracing::error!("Could not load the categories screen: {error}");
                self.load_state = LoadState::Failed(CATEGORIES_LOAD_ERROR.to_owned());
            }
        }

        self.revision.bump();
        true
    }

    /// Stop accepting the results of pending fetches.
    pub fn tear_down(&mut self) {
        self.mount.tear_down();
    }

    /// Select the category `id`, or clear the selection if it is already
    /// selected. Returns the new selection.
    ///
    /// Ignored while the screen is not ready or if `id` is not a known
    /// category.
    pub fn select_category(&mut self, id: CategoryId) -> Option<CategoryId> {
        if !self.load_state.is_ready() || self.categories.get(id).is_none() {
            return self.selected;
        }

        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        self.revision.bump();

        self.selected
    }

    pub(crate) fn category_created(&mut self, category: Category) -> bool {
        self.when_ready(|screen| screen.categories.push(category))
    }

    pub(crate) fn category_updated(&mut self, category: Category) -> bool {
        let id = category.id();

        self.when_ready(|screen| {
            if !screen.categories.replace(category) {
                tracing::warn!("Updated category {id} is not on the categories screen");
            }
        })
    }

    /// Remove the category and its products, and clear the selection.
    pub(crate) fn category_deleted(&mut self, id: CategoryId) -> bool {
        self.when_ready(|screen| {
            screen.categories.remove(id);
            screen
                .products
                .retain(|product| product.category_id != Some(id));
            screen.selected = None;
        })
    }

    pub(crate) fn product_created(&mut self, product: Product) -> bool {
        self.when_ready(|screen| screen.products.push(product))
    }

    pub(crate) fn product_updated(&mut self, product: Product) -> bool {
        self.when_ready(|screen| {
            if let Some(existing) = screen
                .products
                .iter_mut()
                .find(|existing| existing.id == product.id)
            {
                *existing = product;
            }
        })
    }

    pub(crate) fn product_deleted(&mut self, id: ProductId) -> bool {
        self.when_ready(|screen| screen.products.retain(|product| product.id != id))
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

impl ObservableScreen for CategoriesScreen {
    fn is_settled(&self) -> bool {
        self.load_state != LoadState::Loading || !self.mount.is_active()
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

/// Fetch the categories and products and store them in `screen`.
///
/// The lock is released while the requests are in flight. Returns the load
/// state after the fetches finished.
pub async fn mount_categories_screen(
    screen: &Mutex<CategoriesScreen>,
    catalog: &dyn CatalogApi,
) -> LoadState {
    let ticket = screen.lock().await.begin_mount();

    let result = tokio::try_join!(catalog.categories(), catalog.products());

    let mut screen = screen.lock().await;
    screen.finish_mount(ticket, result);
    screen.load_state().clone()
}
