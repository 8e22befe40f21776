//! Engine configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default path of the instrument table.
const DEFAULT_INSTRUMENTS_PATH: &str = "NSE.json";

/// Default monitor polling interval in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {name}")]
    MissingVar {
        /// Variable name.
        name: &'static str,
    },

    /// An environment variable has an unusable value.
    #[error("invalid value for {name}: {message}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// What was wrong.
        message: String,
    },
}

/// Parsed engine configuration.
///
/// # Environment Variables
///
/// - `UPSTOX_ACCESS_TOKEN` (required): trading session token
/// - `INSTRUMENTS_PATH`: instrument table file (default: NSE.json)
/// - `ORDER_BATCH_PATH`: JSON batch of order rows to submit on startup
/// - `POLL_INTERVAL_SECS`: monitor polling interval (default: 5)
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upstox access token.
    pub access_token: String,
    /// Path of the instrument table file.
    pub instruments_path: PathBuf,
    /// Optional path of the order batch to submit on startup.
    pub batch_path: Option<PathBuf>,
    /// Stop-loss monitor polling interval.
    pub poll_interval: Duration,
}

impl EngineConfig {
    /// Parse configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if the access token is missing or the poll interval
    /// is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Parse configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let access_token = lookup("UPSTOX_ACCESS_TOKEN")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar {
                name: "UPSTOX_ACCESS_TOKEN",
            })?;

        let instruments_path = lookup("INSTRUMENTS_PATH")
            .unwrap_or_else(|| DEFAULT_INSTRUMENTS_PATH.to_string())
            .into();

        let batch_path = lookup("ORDER_BATCH_PATH").map(PathBuf::from);

        let poll_interval = match lookup("POLL_INTERVAL_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidVar {
                    name: "POLL_INTERVAL_SECS",
                    message: format!("expected a positive integer, got '{raw}'"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidVar {
                        name: "POLL_INTERVAL_SECS",
                        message: "must be at least 1".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        };

        Ok(Self {
            access_token,
            instruments_path,
            batch_path,
            poll_interval,
        })
    }
}
