//! A JSON-over-HTTP client for the catalog service.

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use super::RemoteError;

/// Issues single, best-effort requests against the catalog service.
///
/// Each call is one round trip to `base_url` joined with the relative path
/// supplied by the caller. There are no retries, no timeouts and no caching.
/// Failures are logged here and returned to the caller, who decides how to
/// surface them.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RemoteClient {
    /// Create a client for the catalog service rooted at `base_url`, e.g.
    /// `http://127.0.0.1:8000/api`.
    pub fn new(base_url: Url) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Create a client that sends its requests through `http`.
    pub fn with_http_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The URL the relative paths are appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and return the parsed JSON body.
    pub async fn fetch(&self, path: &str) -> Result<Value, RemoteError> {
        self.send(Method::GET, path, None).await
    }

    /// POST `body` as JSON to `path` and return the parsed JSON body.
    pub async fn create(&self, path: &str, body: &Value) -> Result<Value, RemoteError> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// PUT `body` as JSON to `path` and return the parsed JSON body.
    pub async fn update(&self, path: &str, body: &Value) -> Result<Value, RemoteError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// DELETE `path` and return the parsed JSON body.
    ///
    /// An empty response body is returned as [Value::Null].
    pub async fn remove(&self, path: &str) -> Result<Value, RemoteError> {
        self.send(Method::DELETE, path, None).await
    }

    /// GET `path` and decode the body into `T`.
    pub(crate) async fn fetch_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let value = self.fetch(path).await?;
        decode(path, value)
    }

    /// Serialize `body` and POST it to `path`, returning the raw JSON answer.
    pub(crate) async fn create_from<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, RemoteError> {
        let body = encode(body)?;
        self.create(path, &body).await
    }

    /// Serialize `body` and PUT it to `path`, returning the raw JSON answer.
    pub(crate) async fn update_from<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, RemoteError> {
        let body = encode(body)?;
        self.update(path, &body).await
    }

    fn url(&self, path: &str) -> Result<Url, RemoteError> {
        if !path.starts_with('/') {
            return Err(RemoteError::InvalidPath(path.to_owned()));
        }

        let base = self.base_url.as_str().trim_end_matches('/');

        Url::parse(&format!("{base}{path}")).map_err(|_| RemoteError::InvalidPath(path.to_owned()))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, RemoteError> {
        let result = self.round_trip(method.clone(), path, body).await;

        if let Err(error) = &result {
            tracing::error!("{method} request to {path} failed: {error}");
        }

        result
    }

    async fn round_trip(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, RemoteError> {
        let url = self.url(path)?;
        tracing::debug!("Sending {method} {url}");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            // Also sets `Content-Type: application/json`.
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|error| RemoteError::Transport(error.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|error| RemoteError::Decode(error.to_string()))
    }
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, RemoteError> {
    serde_json::from_value(value)
        .map_err(|error| RemoteError::Decode(error.to_string()))
        .inspect_err(|error| tracing::error!("Unexpected response from {path}: {error}"))
}

fn encode<B: Serialize>(body: &B) -> Result<Value, RemoteError> {
    serde_json::to_value(body).map_err(|error| RemoteError::Encode(error.to_string()))
}
