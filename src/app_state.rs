//! Implements a struct that holds the state of the console server.

use std::sync::Arc;

use crate::{
    pagination::PaginationConfig,
    remote::CatalogApi,
    session::{SESSION_IDLE_TIMEOUT, SessionStore},
};

/// The state of the console server.
#[derive(Clone)]
pub struct AppState {
    /// The catalog service the screens are fetched from and mutations are sent to.
    pub catalog: Arc<dyn CatalogApi>,

    /// The screens of every browser using the console.
    pub sessions: SessionStore,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] talking to `catalog`.
    ///
    /// Each browser gets its own screens, which are fetched the first time
    /// their page is requested.
    pub fn new(catalog: impl CatalogApi + 'static, pagination_config: PaginationConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            sessions: SessionStore::new(pagination_config.page_size, SESSION_IDLE_TIMEOUT),
            pagination_config,
        }
    }
}
