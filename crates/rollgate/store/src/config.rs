//! Configuration for the update store

use crate::error::Result;
use rollgate_types::DEFAULT_MAX_IDENTIFIER_LENGTH;
use serde::{Deserialize, Serialize};

/// Main store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Job key validation rules
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Job key validation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum length of a role, environment or job name
    #[serde(default = "default_max_identifier_length")]
    pub max_identifier_length: usize,

    /// Accept `.` inside key components
    #[serde(default = "default_true")]
    pub allow_dots: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
            allow_dots: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_identifier_length() -> usize {
    DEFAULT_MAX_IDENTIFIER_LENGTH
}

fn default_log_level() -> String {
    "info".to_string()
}

impl StoreConfig {
    /// Load configuration from defaults, an optional file, then the
    /// environment.
    ///
    /// Environment variables use the `ROLLGATE_` prefix and `__` between
    /// nested keys, e.g. `ROLLGATE_VALIDATION__MAX_IDENTIFIER_LENGTH=64`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        builder = builder.add_source(::config::Config::try_from(&StoreConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ROLLGATE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}
