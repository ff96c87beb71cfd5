//! Rendering of probe outcomes
//!
//! Human mode prints a banner followed by aligned detail lines; JSON mode
//! prints one document describing the outcome.

use objprobe_core::{ObjectMetadata, ObjectTarget, ProbeFailure};
use serde::Serialize;

/// JSON document for a found object
#[derive(Debug, Serialize)]
pub struct FoundOutput {
    status: &'static str,
    bucket: String,
    key: String,
    content_type: Option<String>,
    content_length: i64,
    size_human: String,
    last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage_class: Option<String>,
}

impl FoundOutput {
    pub fn new(target: &ObjectTarget, meta: &ObjectMetadata) -> Self {
        Self {
            status: "found",
            bucket: target.bucket.clone(),
            key: target.key.clone(),
            content_type: meta.content_type.clone(),
            content_length: meta.content_length,
            size_human: meta.size_human(),
            last_modified: meta.last_modified.map(|t| t.to_string()),
            etag: meta.etag.clone(),
            storage_class: meta.storage_class.clone(),
        }
    }
}

/// JSON document for a failed probe
///
/// `bucket` and `key` are left out when the target itself could not be
/// parsed.
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    error_kind: String,
    message: String,
}

impl ErrorOutput {
    pub fn new(target: Option<&ObjectTarget>, failure: &ProbeFailure) -> Self {
        Self {
            status: "error",
            bucket: target.map(|t| t.bucket.clone()),
            key: target.map(|t| t.key.clone()),
            error_kind: failure.error_kind.clone(),
            message: failure.message.clone(),
        }
    }
}

/// Detail lines shown under the "Object found" banner
pub fn success_lines(meta: &ObjectMetadata) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Content-Type   : {}",
            meta.content_type.as_deref().unwrap_or("-")
        ),
        format!(
            "Content-Length : {} bytes ({})",
            meta.content_length,
            meta.size_human()
        ),
        format!(
            "Last-Modified  : {}",
            meta.last_modified
                .map_or_else(|| "-".to_string(), |t| t.to_string())
        ),
    ];
    if let Some(etag) = &meta.etag {
        lines.push(format!("ETag           : {etag}"));
    }
    if let Some(sc) = &meta.storage_class {
        lines.push(format!("Storage-Class  : {sc}"));
    }
    lines
}

/// Detail lines shown under the failure banner
pub fn failure_lines(failure: &ProbeFailure) -> Vec<String> {
    vec![
        format!("Error kind     : {}", failure.error_kind),
        format!("Error message  : {}", failure.message),
    ]
}
