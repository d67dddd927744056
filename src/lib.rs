//! Catalog Admin is a web console for managing the categories and products
//! held by a remote catalog service.
//!
//! This library serves HTML pages directly. Each list page keeps the
//! collection it fetched from the catalog service in memory, derives the
//! filtered, sorted and paginated view from it, and reconciles it in place
//! after every successful create, update or delete.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod coordinator;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod product;
mod remote;
mod routing;
mod screen;
mod session;
mod view_model;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{
    CATEGORIES_LOAD_ERROR, CategoriesScreen, Category, CategoryBody, CategoryFormData, CategoryId,
    CategoryName, mount_categories_screen,
};
pub use coordinator::{Confirmation, Coordinator, DeleteOutcome, DeleteQuery};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use product::{
    PRODUCTS_LOAD_ERROR, Product, ProductBody, ProductFormData, ProductId, ProductsScreen,
    mount_products_screen,
};
pub use remote::{CatalogApi, RemoteClient, RemoteError};
pub use routing::build_router;
pub use screen::{LoadState, MountTicket};
pub use session::{
    SESSION_COOKIE, SESSION_IDLE_TIMEOUT, Session, SessionStore, session_middleware,
};
pub use view_model::{DEFAULT_PAGE_SIZE, ListViewModel, Listable, SortKey};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// A required form field was missing or unusable.
///
/// Validation happens before any call to the catalog service, so a
/// validation error guarantees that nothing was sent over the network.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The name field was empty or only whitespace.
    #[error("Le nom est requis.")]
    MissingName,

    /// The description field was empty or only whitespace.
    #[error("La description est requise.")]
    MissingDescription,

    /// The price field was empty.
    #[error("Le prix est requis.")]
    MissingPrice,

    /// The price field could not be read as a number.
    #[error("Le prix doit être un nombre.")]
    InvalidPrice,

    /// No category was chosen, or the choice was not a category ID.
    #[error("La catégorie est requise.")]
    MissingCategory,
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// A form failed local validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A call to the catalog service failed.
    #[error("the catalog service request failed: {0}")]
    Remote(#[from] RemoteError),

    /// The requested resource was not found.
    ///
    /// For page handlers this means the ID is not in the collection that was
    /// fetched when the list page was last loaded.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => not_found::get_404_not_found_response(),
            Error::Remote(error) => {
                tracing::error!("A catalog service request failed: {error}");
                InternalServerError {
                    description: "Le service catalogue est indisponible.",
                    fix: "Vérifiez que le service catalogue est démarré puis réessayez.",
                }
                .into_response()
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::Validation(error) => Alert::Error {
                message: "Formulaire incomplet".to_owned(),
                details: error.to_string(),
            }
            .into_response_with_status(StatusCode::UNPROCESSABLE_ENTITY),
            Error::NotFound => Alert::Error {
                message: "Élément introuvable".to_owned(),
                details: "Actualisez la page pour voir si l'élément a déjà été supprimé."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::Remote(RemoteError::Status { status: 404, .. }) => Alert::Error {
                message: "Élément introuvable".to_owned(),
                details: "Le service catalogue ne connaît pas cet élément.".to_owned(),
            }
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::Remote(_) => Alert::Error {
                message: "Une erreur est survenue".to_owned(),
                details: "La requête vers le service catalogue a échoué, consultez les \
                    journaux du serveur pour plus de détails."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::BAD_GATEWAY),
        }
    }
}
