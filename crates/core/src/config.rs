//! Configuration management
//!
//! Connection settings come from three layers, later ones winning: built-in
//! defaults, an optional TOML file, and the environment (or CLI flags). The
//! merged settings are validated into an immutable [`ProbeConfig`] before any
//! client is constructed.
//!
//! The configuration file lives at ~/.config/objprobe/config.toml unless
//! another path is given.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "ap-southeast-1";

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "OBJPROBE_CONFIG";

/// Environment variable for the storage endpoint
pub const ENDPOINT_ENV: &str = "S3_ENDPOINT";

/// Environment variable for the region
pub const REGION_ENV: &str = "S3_REGION";

/// Environment variable for the access key
pub const ACCESS_KEY_ENV: &str = "S3_ACCESS_KEY";

/// Environment variable for the secret key
pub const SECRET_KEY_ENV: &str = "S3_SECRET_KEY";

/// On-disk configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Schema version for compatibility checks
    pub schema_version: u32,

    /// Storage connection settings
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            storage: StorageSettings::default(),
        }
    }
}

/// Partially specified connection settings
///
/// Every field is optional so that layers can be merged before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Storage endpoint, with or without a scheme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Region identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Access key ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Secret access key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Path-style bucket addressing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_style: Option<bool>,

    /// Connection timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,

    /// Whole-operation timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_timeout_ms: Option<u64>,
}

impl StorageSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            endpoint: get(ENDPOINT_ENV),
            region: get(REGION_ENV),
            access_key: get(ACCESS_KEY_ENV),
            secret_key: get(SECRET_KEY_ENV),
            path_style: None,
            connect_timeout_ms: None,
            operation_timeout_ms: None,
        }
    }

    /// Overlay `other` on top of `self`; values set in `other` win
    pub fn merge(self, other: StorageSettings) -> StorageSettings {
        StorageSettings {
            endpoint: other.endpoint.or(self.endpoint),
            region: other.region.or(self.region),
            access_key: other.access_key.or(self.access_key),
            secret_key: other.secret_key.or(self.secret_key),
            path_style: other.path_style.or(self.path_style),
            connect_timeout_ms: other.connect_timeout_ms.or(self.connect_timeout_ms),
            operation_timeout_ms: other.operation_timeout_ms.or(self.operation_timeout_ms),
        }
    }
}

/// Validated connection configuration
///
/// Immutable once built. The endpoint is always normalized to carry a scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Normalized endpoint URL
    pub endpoint: String,
    /// Region identifier
    pub region: String,
    /// Access key ID
    pub access_key: String,
    /// Secret access key
    pub secret_key: String,
    /// Path-style bucket addressing
    pub path_style: bool,
    /// Connection timeout, transport default when unset
    pub connect_timeout: Option<Duration>,
    /// Whole-operation timeout, transport default when unset
    pub operation_timeout: Option<Duration>,
}

impl ProbeConfig {
    /// Validate merged settings
    ///
    /// Fails with [`Error::Config`] naming the first missing field.
    pub fn from_settings(settings: StorageSettings) -> Result<Self> {
        let endpoint = required(settings.endpoint, "endpoint", ENDPOINT_ENV)?;
        let access_key = required(settings.access_key, "access key", ACCESS_KEY_ENV)?;
        let secret_key = required(settings.secret_key, "secret key", SECRET_KEY_ENV)?;
        let region = settings
            .region
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            endpoint: normalize_endpoint(&endpoint)?,
            region: region.trim().to_string(),
            access_key,
            secret_key,
            path_style: settings.path_style.unwrap_or(true),
            connect_timeout: settings.connect_timeout_ms.map(Duration::from_millis),
            operation_timeout: settings.operation_timeout_ms.map(Duration::from_millis),
        })
    }
}

impl std::fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("path_style", &self.path_style)
            .field("connect_timeout", &self.connect_timeout)
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}

fn required(value: Option<String>, field: &str, env: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Config(format!("missing {field} (set {env})")))
}

/// Normalize an endpoint value into a URL with a scheme
///
/// A value without a scheme gets `https://` prepended; a value that already
/// has one is returned unchanged apart from surrounding whitespace.
pub fn normalize_endpoint(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::Config("endpoint cannot be empty".into()));
    }

    let endpoint = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let url = url::Url::parse(&endpoint)?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::Config(format!(
                "unsupported endpoint scheme '{other}', expected http or https"
            )));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::Config(format!("endpoint has no host: '{endpoint}'")));
    }

    Ok(endpoint)
}

/// Configuration manager handles locating and loading the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    required: bool,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    ///
    /// The path comes from `OBJPROBE_CONFIG` when set, otherwise the
    /// platform config directory. A missing default file is not an error.
    pub fn new() -> Self {
        Self::locate(std::env::var_os(CONFIG_PATH_ENV), dirs::config_dir())
    }

    /// Pick the config file from an override path and a config directory
    ///
    /// Without either there is no file, and loading yields the defaults.
    fn locate(override_path: Option<OsString>, config_dir: Option<PathBuf>) -> Self {
        if let Some(path) = override_path.filter(|p| !p.is_empty()) {
            return Self::explicit(PathBuf::from(path));
        }

        Self {
            config_path: config_dir.map(|dir| dir.join("objprobe").join("config.toml")),
            required: false,
        }
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    ///
    /// A missing file loads as the default configuration.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
            required: false,
        }
    }

    /// Create a ConfigManager for a path the user named explicitly
    ///
    /// A missing file is a configuration error.
    pub fn explicit(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
            required: true,
        }
    }

    /// Get the configuration file path, if one could be determined
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load configuration from disk
    pub fn load(&self) -> Result<ConfigFile> {
        let Some(path) = self.config_path.as_deref() else {
            tracing::debug!("no config directory; using defaults");
            return Ok(ConfigFile::default());
        };

        if !path.exists() {
            if self.required {
                return Err(Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "no configuration file");
            return Ok(ConfigFile::default());
        }

        tracing::debug!(path = %path.display(), "loading configuration file");
        let content = std::fs::read_to_string(path)?;
        let config: ConfigFile = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade objprobe.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
