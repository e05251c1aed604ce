//! Process configuration loaded from environment variables.
//!
//! | Env Var                  | Default       |
//! |--------------------------|---------------|
//! | `DATABASE_URL`           | required      |
//! | `DATABASE_POOL_SIZE`     | `4`           |
//! | `SWEEP_INTERVAL_SECS`    | unset: one pass |
//! | `TASK_TRANSITION_POLICY` | `permissive`  |

use crate::tracking::{domain::TransitionPolicy, validation::ValidationConfig};
use std::time::Duration;
use thiserror::Error;

/// Default number of pooled database connections.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set to a value that cannot be parsed.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Settings for the task tracking process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// Period of the overdue sweep; `None` runs a single pass.
    pub sweep_interval: Option<Duration>,
    /// Field limits and transition policy handed to services.
    pub validation: ValidationConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = read("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let pool_size = match read("DATABASE_POOL_SIZE") {
            Some(raw) => parse_positive("DATABASE_POOL_SIZE", &raw)?,
            None => DEFAULT_POOL_SIZE,
        };

        let sweep_interval = read("SWEEP_INTERVAL_SECS")
            .map(|raw| parse_positive("SWEEP_INTERVAL_SECS", &raw))
            .transpose()?
            .map(|secs| Duration::from_secs(u64::from(secs)));

        let transition_policy = match read("TASK_TRANSITION_POLICY") {
            Some(raw) => {
                TransitionPolicy::try_from(raw.as_str()).map_err(|err| ConfigError::Invalid {
                    key: "TASK_TRANSITION_POLICY",
                    reason: err.to_string(),
                })?
            }
            None => TransitionPolicy::default(),
        };

        Ok(Self {
            database_url,
            pool_size,
            sweep_interval,
            validation: ValidationConfig::default().with_transition_policy(transition_policy),
        })
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match raw.parse::<u32>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            reason: "must be greater than zero".to_owned(),
        }),
        Ok(value) => Ok(value),
        Err(err) => Err(ConfigError::Invalid {
            key,
            reason: err.to_string(),
        }),
    }
}
