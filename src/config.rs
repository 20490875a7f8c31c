//! Layered configuration.
//!
//! Sources are applied in order of increasing precedence: built-in defaults,
//! an optional `workforce.toml`, then `WORKFORCE__*` environment variables
//! with `__` separating nested keys (for example
//! `WORKFORCE__NOTIFICATIONS__MAX_ATTEMPTS=3`). A `.env` file in the working
//! directory is loaded into the environment first when present.

use crate::notification::domain::RetryPolicy;
use crate::verification::services::VerificationSettings;
use ::config::{Config, Environment, File, FileFormat, Map};
use chrono::Duration;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool, PoolError},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "WORKFORCE";

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "workforce.toml";

const ENV_SEPARATOR: &str = "__";

/// Errors raised while loading configuration or building resources from it.
#[derive(Debug, Error)]
pub enum WorkforceConfigError {
    /// A source could not be read or deserialised.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    /// The `.env` file exists but could not be parsed.
    #[error("failed to read .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
    /// The database pool could not be created.
    #[error("failed to create database pool: {0}")]
    Pool(#[from] PoolError),
    /// A duration setting exceeds its upper bound.
    #[error("{key} = {value} exceeds the maximum of {max}")]
    OutOfRange {
        /// Dotted configuration key.
        key: &'static str,
        /// Configured value.
        value: u64,
        /// Largest accepted value.
        max: u64,
    },
}

/// Largest accepted value for settings expressed in seconds (one day).
pub const MAX_DURATION_SECS: u64 = 86_400;

/// Largest accepted value for settings expressed in hours (one year).
pub const MAX_DURATION_HOURS: u32 = 8_760;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkforceConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Outbox delivery settings.
    pub notifications: NotificationConfig,
    /// SMS verification settings.
    pub verification: VerificationConfig,
    /// Role transfer settings.
    pub role_transfer: RoleTransferConfig,
    /// SLA monitor settings.
    pub sla: SlaConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/workforce".to_owned(),
            pool_size: 10,
        }
    }
}

impl DatabaseConfig {
    /// Builds an r2d2 connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`WorkforceConfigError::Pool`] when the pool cannot open its
    /// initial connections.
    pub fn connect(&self) -> Result<Pool<ConnectionManager<PgConnection>>, WorkforceConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.url.as_str());
        Ok(Pool::builder()
            .max_size(self.pool_size.max(1))
            .build(manager)?)
    }
}

/// Outbox delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Attempts before a message is marked failed.
    pub max_attempts: u32,
    /// Base back-off delay in seconds.
    pub retry_delay_secs: u64,
    /// Messages claimed per dispatch run.
    pub batch_size: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay_secs: 30,
            batch_size: 50,
        }
    }
}

impl NotificationConfig {
    /// Returns the dispatcher retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`WorkforceConfigError::OutOfRange`] when the retry delay is
    /// longer than [`MAX_DURATION_SECS`].
    pub fn retry_policy(&self) -> Result<RetryPolicy, WorkforceConfigError> {
        let base_delay = seconds("notifications.retry_delay_secs", self.retry_delay_secs)?;
        Ok(RetryPolicy::new(self.max_attempts, base_delay))
    }
}

/// SMS verification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// How long a code is accepted, in seconds.
    pub code_ttl_secs: u64,
    /// Minimum time between two codes for the same number, in seconds.
    pub resend_cooldown_secs: u64,
    /// Wrong guesses allowed per code.
    pub max_attempts: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_secs: 600,
            resend_cooldown_secs: 60,
            max_attempts: 5,
        }
    }
}

impl VerificationConfig {
    /// Returns the verification service settings.
    ///
    /// # Errors
    ///
    /// Returns [`WorkforceConfigError::OutOfRange`] when the code lifetime or
    /// the resend cooldown is longer than [`MAX_DURATION_SECS`].
    pub fn settings(&self) -> Result<VerificationSettings, WorkforceConfigError> {
        Ok(VerificationSettings {
            code_ttl: seconds("verification.code_ttl_secs", self.code_ttl_secs)?,
            resend_cooldown: seconds(
                "verification.resend_cooldown_secs",
                self.resend_cooldown_secs,
            )?,
            max_attempts: self.max_attempts,
        })
    }
}

/// Role transfer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleTransferConfig {
    /// Approval token lifetime in hours.
    pub token_lifetime_hours: u32,
}

impl Default for RoleTransferConfig {
    fn default() -> Self {
        Self {
            token_lifetime_hours: 24,
        }
    }
}

impl RoleTransferConfig {
    /// Returns the approval token lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`WorkforceConfigError::OutOfRange`] above
    /// [`MAX_DURATION_HOURS`].
    pub fn token_lifetime(&self) -> Result<Duration, WorkforceConfigError> {
        hours("role_transfer.token_lifetime_hours", self.token_lifetime_hours)
    }
}

/// SLA monitor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaConfig {
    /// How far ahead of the due time an "approaching" alert fires, in hours.
    pub warning_window_hours: u32,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            warning_window_hours: 24,
        }
    }
}

impl SlaConfig {
    /// Returns the warning window.
    ///
    /// # Errors
    ///
    /// Returns [`WorkforceConfigError::OutOfRange`] above
    /// [`MAX_DURATION_HOURS`].
    pub fn warning_window(&self) -> Result<Duration, WorkforceConfigError> {
        hours("sla.warning_window_hours", self.warning_window_hours)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, for example `info,mpcn_workforce=debug`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            json: false,
        }
    }
}

impl WorkforceConfig {
    /// Loads `.env`, then layers `workforce.toml` and the process environment
    /// over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WorkforceConfigError`] when `.env` is malformed or a source
    /// cannot be deserialised.
    pub fn load() -> Result<Self, WorkforceConfigError> {
        load_env_file()?;
        let config = Self::load_from(Some(Path::new(DEFAULT_CONFIG_FILE)), None)?;
        info!(
            notifications.max_attempts = config.notifications.max_attempts,
            logging.json = config.logging.json,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Layers an optional TOML file and environment variables over the
    /// defaults.
    ///
    /// A missing file is skipped. When `env` is `None` the process
    /// environment is read; otherwise only the supplied map is consulted.
    ///
    /// # Errors
    ///
    /// Returns [`WorkforceConfigError::Load`] when a source cannot be parsed
    /// or a value has the wrong type, and
    /// [`WorkforceConfigError::OutOfRange`] when a duration is too long.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, WorkforceConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every duration setting against its upper bound.
    ///
    /// # Errors
    ///
    /// Returns the first [`WorkforceConfigError::OutOfRange`] found.
    pub fn validate(&self) -> Result<(), WorkforceConfigError> {
        self.notifications.retry_policy()?;
        self.verification.settings()?;
        self.role_transfer.token_lifetime()?;
        self.sla.warning_window()?;
        Ok(())
    }
}

fn load_env_file() -> Result<(), WorkforceConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => {
            info!(path = %path.display(), "loaded environment from .env");
            Ok(())
        }
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn seconds(key: &'static str, value: u64) -> Result<Duration, WorkforceConfigError> {
    if value > MAX_DURATION_SECS {
        return Err(WorkforceConfigError::OutOfRange {
            key,
            value,
            max: MAX_DURATION_SECS,
        });
    }
    Ok(Duration::seconds(i64::try_from(value).unwrap_or(i64::MAX)))
}

fn hours(key: &'static str, value: u32) -> Result<Duration, WorkforceConfigError> {
    if value > MAX_DURATION_HOURS {
        return Err(WorkforceConfigError::OutOfRange {
            key,
            value: u64::from(value),
            max: u64::from(MAX_DURATION_HOURS),
        });
    }
    Ok(Duration::hours(i64::from(value)))
}
