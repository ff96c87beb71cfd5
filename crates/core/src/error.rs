//! Error types for objprobe-core
//!
//! Provides a unified error type that can be classified into a probe failure
//! and converted to an appropriate exit code.

use thiserror::Error;

use crate::probe::FailureClass;

/// Result type alias for objprobe-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for objprobe-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid bucket or key
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Bucket or object does not exist
    #[error("{code}: {message}")]
    NotFound { code: String, message: String },

    /// Credentials lack permission, or were rejected
    #[error("{code}: {message}")]
    AccessDenied { code: String, message: String },

    /// The request never produced a usable response
    #[error("{kind}: {message}")]
    Network { kind: String, message: String },

    /// Any other error reported by the storage service
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Coarse classification used for reporting and exit codes
    pub const fn class(&self) -> FailureClass {
        match self {
            Error::Config(_)
            | Error::InvalidTarget(_)
            | Error::InvalidUrl(_)
            | Error::TomlParse(_) => FailureClass::Config,
            Error::NotFound { .. } => FailureClass::NotFound,
            Error::AccessDenied { .. } => FailureClass::AccessDenied,
            Error::Network { .. } => FailureClass::Network,
            Error::Io(_) | Error::Service { .. } | Error::General(_) => FailureClass::Service,
        }
    }

    /// Classification string as reported by the backend, or a local name
    /// for errors raised before any request was made
    pub fn kind(&self) -> &str {
        match self {
            Error::Config(_) | Error::InvalidUrl(_) | Error::TomlParse(_) => "ConfigError",
            Error::InvalidTarget(_) => "InvalidTarget",
            Error::Io(_) => "IoError",
            Error::NotFound { code, .. }
            | Error::AccessDenied { code, .. }
            | Error::Service { code, .. } => code,
            Error::Network { kind, .. } => kind,
            Error::General(_) => "Error",
        }
    }

    /// Descriptive message without the classification prefix
    pub fn message(&self) -> String {
        match self {
            Error::NotFound { message, .. }
            | Error::AccessDenied { message, .. }
            | Error::Network { message, .. }
            | Error::Service { message, .. } => message.clone(),
            Error::Config(msg) | Error::InvalidTarget(msg) | Error::General(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
