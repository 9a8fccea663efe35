//! Application configuration.
//!
//! Everything comes from `RECEPCION__*` environment variables (a `.env`
//! file is read first when present), with `__` between nested keys:
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `RECEPCION__DATABASE__URL` | PostgreSQL url (required) |
//! | `RECEPCION__SERVER__PORT` | listen port, default 8080 |
//! | `RECEPCION__SERVER__CORS_ORIGINS` | comma-separated origins |
//! | `RECEPCION__RECEIPTS__OUTPUT_DIR` | receipt and QR directory |
//! | `RECEPCION__NOTIFICATIONS__ENABLED` | send e-mail / WhatsApp |
//!
//! ```no_run
//! use recepcion::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! ```

mod database;
mod error;
mod notifications;
mod receipts;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use notifications::NotificationConfig;
pub use receipts::ReceiptConfig;
pub use server::{Environment, ServerConfig};

use config::{Config, Environment as EnvSource};
use serde::Deserialize;

const ENV_PREFIX: &str = "RECEPCION";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub receipts: ReceiptConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl AppConfig {
    /// Reads `.env` (if any) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(EnvSource::default())
    }

    fn from_source(source: EnvSource) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                source
                    .prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Checks every section, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.receipts.validate()?;
        self.notifications.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
