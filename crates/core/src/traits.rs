//! ObjectStore trait definition
//!
//! This trait defines the metadata lookup the prober needs from a storage
//! backend. It keeps the probe logic decoupled from the S3 SDK.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::ObjectTarget;

/// Metadata returned by a metadata-only request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Object key
    pub key: String,

    /// Content type, when the backend reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Size in bytes
    pub content_length: i64,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Storage class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

impl ObjectMetadata {
    /// Create metadata for an object of the given size
    pub fn new(key: impl Into<String>, content_length: i64) -> Self {
        Self {
            key: key.into(),
            content_type: None,
            content_length,
            last_modified: None,
            etag: None,
            storage_class: None,
        }
    }

    /// Human-readable size
    pub fn size_human(&self) -> String {
        humansize::format_size(self.content_length.max(0) as u64, humansize::BINARY)
    }
}

/// Trait for S3-compatible storage backends
///
/// Implemented by the S3 adapter and mocked in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch object metadata without transferring the body
    async fn head_object(&self, target: &ObjectTarget) -> Result<ObjectMetadata>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_metadata_new() {
        let meta = ObjectMetadata::new("photo.png", 204800);
        assert_eq!(meta.key, "photo.png");
        assert_eq!(meta.content_length, 204800);
        assert!(meta.content_type.is_none());
        assert!(meta.last_modified.is_none());
    }

    #[test]
    fn test_size_human() {
        assert_eq!(ObjectMetadata::new("a", 204800).size_human(), "200 KiB");
        assert_eq!(ObjectMetadata::new("a", 0).size_human(), "0 B");
    }

    #[test]
    fn test_metadata_serialization_skips_absent() {
        let mut meta = ObjectMetadata::new("photo.png", 10);
        meta.last_modified = Some("2024-03-01T12:00:00Z".parse().unwrap());
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["last_modified"], "2024-03-01T12:00:00Z");
        assert!(json.get("content_type").is_none());
        assert!(json.get("etag").is_none());
    }
}
