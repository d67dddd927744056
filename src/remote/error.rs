//! Failures when talking to the catalog service.

/// A request to the catalog service did not produce a usable response.
///
/// The underlying cause is kept as text so the error can be cloned, compared
/// in tests and shown in logs.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The request could not be sent or the response could not be read,
    /// e.g., the service is down or the connection was reset.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a status outside of the 2xx range.
    #[error("the catalog service responded with status {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, as lossy UTF-8.
        body: String,
    },

    /// The request body could not be serialized to JSON.
    #[error("could not encode the request body: {0}")]
    Encode(String),

    /// The response body was not the JSON that was expected.
    #[error("could not decode the response body: {0}")]
    Decode(String),

    /// The relative path could not be joined onto the base URL.
    #[error("invalid request path \"{0}\"")]
    InvalidPath(String),
}
