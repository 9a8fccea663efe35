//! Client notification adapters.

mod fanout;
mod resend;
mod whatsapp;

pub use fanout::{FanoutNotifier, LoggingNotifier};
pub use resend::ResendNotifier;
pub use whatsapp::WhatsAppNotifier;

use secrecy::ExposeSecret;
use std::sync::Arc;

use crate::config::NotificationConfig;
use crate::ports::Notifier;

/// Builds the notifier for the configured channels.
pub fn from_config(config: &NotificationConfig) -> Arc<dyn Notifier> {
    let mut channels: Vec<Arc<dyn Notifier>> = Vec::new();
    if config.email_enabled() {
        if let Some(key) = &config.resend_api_key {
            channels.push(Arc::new(ResendNotifier::new(
                key.expose_secret().clone(),
                config.from_header(),
            )));
        }
    }
    if config.whatsapp_enabled() {
        if let Some(url) = &config.whatsapp_api_url {
            let token = config
                .whatsapp_token
                .as_ref()
                .map(|t| t.expose_secret().clone())
                .unwrap_or_default();
            channels.push(Arc::new(WhatsAppNotifier::new(url.clone(), token)));
        }
    }

    if channels.is_empty() {
        Arc::new(LoggingNotifier)
    } else {
        Arc::new(FanoutNotifier::new(channels))
    }
}
