//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `SHOP_LOG_FORMAT` - `text` (default) or `json`
//! - `RUST_LOG` - tracing filter (default: `shop_cli=info,shop_store=info`)

use std::str::FromStr;

use thiserror::Error;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "shop_cli=info,shop_store=info";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How log lines are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `SHOP_LOG_FORMAT` is set to an
    /// unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_format = lookup("SHOP_LOG_FORMAT")
            .map(|value| value.parse())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_LOG_FORMAT".to_string(), e))?
            .unwrap_or_default();

        Ok(Self { log_format })
    }
}
