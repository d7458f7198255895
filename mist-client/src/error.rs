//! Client error types.

use thiserror::Error;

/// Errors raised by the transport and session layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// A request never produced a response (timeout, DNS, TLS, connection reset).
    #[error("{method} {path} failed: {source}")]
    Request {
        method: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API token was rejected by the credential probe.
    #[error("failed to login using API token, please verify validity of API token")]
    Unauthorized,
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
