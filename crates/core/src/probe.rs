//! Object existence probe
//!
//! A probe issues exactly one metadata-only request and folds the outcome
//! into a [`ProbeResult`]. Backend errors stop here; they are reported, not
//! propagated.

use serde::Serialize;

use crate::error::Error;
use crate::path::ObjectTarget;
use crate::traits::{ObjectMetadata, ObjectStore};

/// Coarse failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// Missing or invalid configuration, raised before any request
    Config,
    /// Bucket or object does not exist
    NotFound,
    /// Credential or permission failure
    AccessDenied,
    /// The backend could not be reached or did not answer
    Network,
    /// Any other backend-reported error
    Service,
}

/// A failed probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeFailure {
    /// Coarse classification
    pub class: FailureClass,
    /// Classification as reported by the backend (e.g. `NotFound`)
    pub error_kind: String,
    /// Descriptive message
    pub message: String,
}

impl From<&Error> for ProbeFailure {
    fn from(err: &Error) -> Self {
        Self {
            class: err.class(),
            error_kind: err.kind().to_string(),
            message: err.message(),
        }
    }
}

impl From<Error> for ProbeFailure {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The object exists
    Success(ObjectMetadata),
    /// The lookup failed
    Failure(ProbeFailure),
}

/// Check whether `target` exists and collect its metadata
pub async fn probe(store: &dyn ObjectStore, target: &ObjectTarget) -> ProbeResult {
    tracing::debug!(bucket = %target.bucket, key = %target.key, "probing object");

    match store.head_object(target).await {
        Ok(meta) => {
            tracing::debug!(
                content_length = meta.content_length,
                content_type = meta.content_type.as_deref().unwrap_or("-"),
                "object found"
            );
            ProbeResult::Success(meta)
        }
        Err(e) => {
            tracing::warn!(object = %target, kind = e.kind(), "probe failed: {e}");
            ProbeResult::Failure(ProbeFailure::from(e))
        }
    }
}
