//! Store configuration.
//!
//! Connection settings and the per-statement deadline shared by every
//! repository. Values come from defaults, an optional JSON file and
//! `LIBRES_*` environment variables, in that order of precedence (lowest
//! first).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Deadline applied to every statement unless configured otherwise.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database used when none is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:libres.db";

/// Pool size used when none is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub const ENV_DATABASE_URL: &str = "LIBRES_DATABASE_URL";
pub const ENV_MAX_CONNECTIONS: &str = "LIBRES_MAX_CONNECTIONS";
pub const ENV_QUERY_TIMEOUT_MS: &str = "LIBRES_QUERY_TIMEOUT_MS";

/// Configuration for the relational store and its repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// sqlx connection URL, e.g. `sqlite:/var/lib/libres/libres.db`.
    pub database_url: String,

    /// Upper bound on pooled connections.
    pub max_connections: u32,

    /// Per-statement deadline in milliseconds.
    pub query_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl StoreConfig {
    /// Create a configuration with the default URL, pool size and deadline.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            query_timeout_ms: duration_to_millis(DEFAULT_QUERY_TIMEOUT),
        }
    }

    /// Replace the per-statement deadline.
    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout_ms = duration_to_millis(timeout);
        self
    }

    /// The per-statement deadline.
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    /// Parse a JSON document. Missing keys fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::with_defaults().with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overlay values found through `lookup` (keyed by the `LIBRES_*`
    /// variable names). Unparseable values are logged and ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database_url = url;
        }

        if let Some(raw) = lookup(ENV_MAX_CONNECTIONS) {
            match raw.trim().parse() {
                Ok(n) => self.max_connections = n,
                Err(e) => warn!("Ignoring {ENV_MAX_CONNECTIONS}={raw:?}: {e}"),
            }
        }

        if let Some(raw) = lookup(ENV_QUERY_TIMEOUT_MS) {
            match raw.trim().parse() {
                Ok(ms) => self.query_timeout_ms = ms,
                Err(e) => warn!("Ignoring {ENV_QUERY_TIMEOUT_MS}={raw:?}: {e}"),
            }
        }

        self
    }

    /// Check the configuration for values that would make every call fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        if self.max_connections == 0 {
            return Err(ConfigError::ZeroMaxConnections);
        }
        if self.query_timeout_ms == 0 {
            return Err(ConfigError::ZeroQueryTimeout);
        }
        Ok(())
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Configuration loading or validation error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Database URL cannot be empty")]
    EmptyDatabaseUrl,

    #[error("Max connections must be at least 1")]
    ZeroMaxConnections,

    #[error("Query timeout must be greater than zero")]
    ZeroQueryTimeout,
}
