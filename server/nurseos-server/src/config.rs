//! Layered server configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional config
//! file, `NURSEOS__*` environment variables (`__` separates sections, e.g.
//! `NURSEOS__DATABASE__MAX_CONNECTIONS=50`), and finally `DATABASE_URL`.

use std::path::Path;

use audit_engine::QueryLimits;
use config::{Config, Environment, File};
use database_layer::PoolSettings;
use error_common::{NurseOsError, Result};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "NURSEOS";

/// Server configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: HttpSettings,
    pub database: DatabaseSettings,
    pub events: QueryLimits,
    pub cors: CorsSettings,
}

/// Listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub host: String,
    pub port: u16,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Event store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    #[serde(flatten)]
    pub pool: PoolSettings,
    /// Create the event log table and indexes at startup
    pub bootstrap_schema: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            pool: PoolSettings::default(),
            bootstrap_schema: true,
        }
    }
}

/// Cross-origin policy. `"*"` allows any origin.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl CorsSettings {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

impl ServerConfig {
    /// Load configuration from the optional file plus the environment
    ///
    /// # Errors
    ///
    /// Returns [`NurseOsError::ConfigError`] when a source cannot be parsed or
    /// the resulting configuration is inconsistent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").ok();
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX), database_url)
    }

    fn load_from(
        path: Option<&Path>,
        environment: Environment,
        database_url: Option<String>,
    ) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let config: ServerConfig = builder
            .add_source(
                environment
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", database_url)
            .and_then(|builder| builder.build())
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| NurseOsError::ConfigError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field consistency
    ///
    /// # Errors
    ///
    /// Returns [`NurseOsError::ConfigError`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(NurseOsError::ConfigError("server.port must be non-zero".into()));
        }
        if self.database.pool.url.trim().is_empty() {
            return Err(NurseOsError::ConfigError("database.url must be set".into()));
        }
        if self.events.max_limit <= 0 {
            return Err(NurseOsError::ConfigError(
                "events.max_limit must be positive".into(),
            ));
        }
        if self.events.default_limit < 0 || self.events.default_limit > self.events.max_limit {
            return Err(NurseOsError::ConfigError(
                "events.default_limit must be between 0 and events.max_limit".into(),
            ));
        }
        if self.cors.allowed_origins.is_empty() {
            return Err(NurseOsError::ConfigError(
                "cors.allowed_origins must list at least one origin".into(),
            ));
        }
        Ok(())
    }
}
