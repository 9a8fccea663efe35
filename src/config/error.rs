//! Configuration errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// A setting that loaded but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("RECEPCION__{0} is required")]
    MissingRequired(&'static str),

    #[error("server port cannot be 0")]
    InvalidPort,

    #[error("server host is not a valid address")]
    InvalidHost,

    #[error("timeouts must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("database url must use postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("database pool must hold between 1 and {0} connections")]
    InvalidPoolSize(u32),

    #[error("receipt output directory cannot be empty")]
    EmptyReceiptDir,

    #[error("Resend API keys start with re_")]
    InvalidResendKey,

    #[error("sender e-mail address is not valid")]
    InvalidFromEmail,

    #[error("WhatsApp gateway url must use http or https")]
    InvalidWhatsAppUrl,

    #[error("notifications are enabled but neither e-mail nor WhatsApp is configured")]
    NoNotificationChannel,
}
