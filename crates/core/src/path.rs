//! Object target parsing
//!
//! A target names one object: a bucket and a key. It can be built from
//! separate values or parsed from the combined `bucket/key` form.

use crate::error::{Error, Result};

/// The bucket and key of the object to probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTarget {
    /// Bucket name
    pub bucket: String,
    /// Object key
    pub key: String,
}

impl ObjectTarget {
    /// Create a validated target
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let bucket = bucket.into();
        let key = key.into();

        if bucket.is_empty() {
            return Err(Error::InvalidTarget("Bucket name cannot be empty".into()));
        }
        if bucket.contains('/') {
            return Err(Error::InvalidTarget(format!(
                "Bucket name cannot contain '/': '{bucket}'"
            )));
        }
        if key.is_empty() {
            return Err(Error::InvalidTarget("Object key cannot be empty".into()));
        }

        Ok(Self { bucket, key })
    }

    /// Get the combined path as a string (bucket/key)
    pub fn to_full_path(&self) -> String {
        format!("{}/{}", self.bucket, self.key)
    }
}

impl std::fmt::Display for ObjectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_full_path())
    }
}

/// Parse a `bucket/key` string into a target
///
/// An optional `s3://` prefix is accepted. Everything after the first `/`
/// is the key, so keys may themselves contain slashes.
pub fn parse_target(path: &str) -> Result<ObjectTarget> {
    let path = path.strip_prefix("s3://").unwrap_or(path);

    if path.is_empty() {
        return Err(Error::InvalidTarget("Path cannot be empty".into()));
    }

    match path.split_once('/') {
        Some((bucket, key)) => ObjectTarget::new(bucket, key),
        None => Err(Error::InvalidTarget(format!(
            "Invalid path format: '{path}'. Expected: bucket/key"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_new_valid() {
        let target = ObjectTarget::new("verp-storage", "employee-profiles/18881.png").unwrap();
        assert_eq!(target.bucket, "verp-storage");
        assert_eq!(target.key, "employee-profiles/18881.png");
        assert_eq!(target.to_string(), "verp-storage/employee-profiles/18881.png");
    }

    #[test]
    fn test_target_empty_parts() {
        assert!(matches!(
            ObjectTarget::new("", "key"),
            Err(Error::InvalidTarget(_))
        ));
        assert!(matches!(
            ObjectTarget::new("bucket", ""),
            Err(Error::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_target_bucket_with_slash() {
        assert!(ObjectTarget::new("a/b", "key").is_err());
    }

    #[test]
    fn test_parse_target_with_prefix() {
        let target = parse_target("mybucket/path/to/file.txt").unwrap();
        assert_eq!(target.bucket, "mybucket");
        assert_eq!(target.key, "path/to/file.txt");
    }

    #[test]
    fn test_parse_target_s3_scheme() {
        let target = parse_target("s3://mybucket/file.txt").unwrap();
        assert_eq!(target.bucket, "mybucket");
        assert_eq!(target.key, "file.txt");
    }

    #[test]
    fn test_parse_target_no_key() {
        assert!(parse_target("mybucket").is_err());
        assert!(parse_target("mybucket/").is_err());
    }

    #[test]
    fn test_parse_target_empty() {
        assert!(parse_target("").is_err());
        assert!(parse_target("s3://").is_err());
    }
}
