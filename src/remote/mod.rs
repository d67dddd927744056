//! Access to the remote catalog service.

mod catalog_api;
mod client;
mod error;

pub use catalog_api::CatalogApi;
pub use client::RemoteClient;
pub use error::RemoteError;
