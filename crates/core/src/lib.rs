//! objprobe-core: Core library for the objprobe object existence checker
//!
//! This crate provides the core functionality for objprobe, including:
//! - Configuration loading and validation
//! - Object target parsing
//! - The ObjectStore trait for metadata lookups
//! - The probe operation and its result types
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! so the probe logic can be tested without a storage backend.

pub mod config;
pub mod error;
pub mod path;
pub mod probe;
pub mod traits;

pub use config::{ConfigFile, ConfigManager, ProbeConfig, StorageSettings};
pub use error::{Error, Result};
pub use path::{parse_target, ObjectTarget};
pub use probe::{probe, FailureClass, ProbeFailure, ProbeResult};
pub use traits::{ObjectMetadata, ObjectStore};
