//! PostgreSQL connection settings

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::error::ValidationError;

/// Largest pool a single front desk instance may open.
const POOL_CEILING: u32 = 50;

/// Connection pool for the back office database.
///
/// The URL carries credentials, so it stays wrapped until the pool is
/// opened and never shows up in `Debug` output.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: SecretString,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free connection before failing the request
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Apply `migrations/` before serving
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: SecretString::new(url.into()),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: default_run_migrations(),
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(1)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout())
    }

    /// Opens the pool, failing fast if the server is unreachable.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        self.pool_options().connect(self.url.expose_secret()).await
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.url.expose_secret();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 || self.max_connections > POOL_CEILING {
            return Err(ValidationError::InvalidPoolSize(POOL_CEILING));
        }
        if self.acquire_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_run_migrations() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_suit_a_single_front_desk() {
        let config = DatabaseConfig::new("postgres://localhost/recepcion");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
        assert!(config.run_migrations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn url_is_redacted_in_debug_output() {
        let config = DatabaseConfig::new("postgres://admin:hunter2@db/recepcion");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn rejects_other_database_schemes() {
        let config = DatabaseConfig::new("mysql://localhost/recepcion");
        assert!(matches!(config.validate(), Err(ValidationError::InvalidDatabaseUrl)));
    }

    #[test]
    fn rejects_empty_url() {
        assert!(matches!(
            DatabaseConfig::new("").validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn pool_size_is_bounded() {
        let mut config = DatabaseConfig::new("postgresql://localhost/recepcion");
        config.max_connections = 0;
        assert!(config.validate().is_err());
        config.max_connections = 51;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPoolSize(50))));
    }
}
