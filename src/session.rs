//! Per-browser view state.
//!
//! Every browser gets its own pair of screens, found through a session
//! cookie. Search terms, sort keys, pages and selections made in one browser
//! never show up in another.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{AppState, category::CategoriesScreen, product::ProductsScreen};

/// The name of the cookie holding the session ID.
pub const SESSION_COOKIE: &str = "catalog_session";

/// Sessions unused for this long are dropped.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// The screens of one browser.
#[derive(Debug, Clone)]
pub struct Session {
    /// The state behind the products page.
    pub products_screen: Arc<Mutex<ProductsScreen>>,
    /// The state behind the categories page.
    pub categories_screen: Arc<Mutex<CategoriesScreen>>,
}

impl Session {
    /// Create a session whose screens have not been mounted yet.
    pub fn new(page_size: usize) -> Self {
        Self {
            products_screen: Arc::new(Mutex::new(ProductsScreen::new(page_size))),
            categories_screen: Arc::new(Mutex::new(CategoriesScreen::new(page_size))),
        }
    }

    /// Discard the results of any fetch still in flight for either screen.
    pub async fn tear_down(&self) {
        self.products_screen.lock().await.tear_down();
        self.categories_screen.lock().await.tear_down();
    }
}

#[derive(Debug)]
struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// The live sessions, keyed by the ID stored in [SESSION_COOKIE].
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<std::sync::Mutex<HashMap<Uuid, SessionEntry>>>,
    page_size: usize,
    idle_timeout: Duration,
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl SessionStore {
    /// Create an empty store whose screens show `page_size` items per page.
    pub fn new(page_size: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            page_size,
            idle_timeout,
        }
    }

    /// Get the session `id`, or start a new one if `id` is missing, unknown
    /// or expired.
    ///
    /// Returns the session and, if it was just created, its new ID. Expired
    /// sessions are torn down along the way.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Session, Option<Uuid>) {
        let now = Instant::now();
        let idle_timeout = self.idle_timeout;
        let mut expired = Vec::new();

        let found = {
            let mut sessions = self
                .sessions
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            sessions.retain(|_, entry| {
                let alive = now.duration_since(entry.last_seen) < idle_timeout;
                if !alive {
                    expired.push(entry.session.clone());
                }
                alive
            });

            match id.and_then(|id| sessions.get_mut(&id)) {
                Some(entry) => {
                    entry.last_seen = now;
                    (entry.session.clone(), None)
                }
                None => {
                    let id = Uuid::new_v4();
                    let session = Session::new(self.page_size);
                    sessions.insert(
                        id,
                        SessionEntry {
                            session: session.clone(),
                            last_seen: now,
                        },
                    );
                    (session, Some(id))
                }
            }
        };

        for session in expired {
            tracing::debug!("Tearing down an expired session");
            session.tear_down().await;
        }

        found
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Middleware that finds the browser's session from its cookie, or starts a
/// new one and sets the cookie on the response.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(session): Extension<Session>` to receive the session.
pub async fn session_middleware(
    State(store): State<SessionStore>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

    let (session, new_id) = store.get_or_create(id).await;
    request.extensions_mut().insert(session);

    let response = next.run(request).await;

    match new_id {
        Some(id) => {
            let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict);

            (jar.add(cookie), response).into_response()
        }
        None => response,
    }
}
