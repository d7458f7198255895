//! Reconciliation error types.

use mist_client::ClientError;
use serde_json::Value;
use thiserror::Error;

/// Errors that terminate a reconciliation.
///
/// None of these are retried or compensated; the invocation stops at the
/// first one.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Transport failure or rejected credentials.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A listing or mutating call returned an unexpected status.
    #[error("unexpected status {status} from {path}, here is the response to help you debug: {body}")]
    Upstream {
        path: String,
        status: u16,
        body: Value,
    },

    /// A listing did not come back as a JSON array.
    #[error("the response from {path} is not in a list format: {body}")]
    Shape { path: String, body: Value },

    /// An entry matched by name carries no usable identifier.
    #[error("entry named '{name}' has no string '{field}' field")]
    MissingId { name: String, field: String },

    /// A site or site-group name did not match anything in the listing.
    #[error("{kind} '{name}' does not exist, here is the list we got back from Mist: {candidates}")]
    ReferenceNotFound {
        kind: &'static str,
        name: String,
        candidates: Value,
    },

    /// More than one remote object carries the same name (strict policy only).
    #[error("name '{name}' matches {count} objects")]
    AmbiguousName { name: String, count: usize },

    /// A resource-specific precondition is unmet.
    #[error("{0}")]
    Precondition(String),

    /// The first step of a two-step mutation succeeded and the second failed.
    /// The created object is left in place.
    #[error("{kind} was created but the follow-up update failed: {source}")]
    PartialFailure {
        kind: &'static str,
        created: Value,
        #[source]
        source: Box<ReconcileError>,
    },

    /// The desired state could not be encoded as JSON.
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, ReconcileError>;
