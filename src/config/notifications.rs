//! Notification configuration (Resend e-mail, WhatsApp gateway)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Client notification settings.
///
/// Each channel is active when its credentials are present. With
/// `enabled = false` messages are only logged.
#[derive(Debug, Deserialize)]
pub struct NotificationConfig {
    /// Master switch
    #[serde(default)]
    pub enabled: bool,

    /// Resend API key (`re_...`)
    pub resend_api_key: Option<SecretString>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// WhatsApp gateway endpoint accepting `{phone, message, attachment}`
    pub whatsapp_api_url: Option<String>,

    /// Bearer token for the WhatsApp gateway
    pub whatsapp_token: Option<SecretString>,
}

impl NotificationConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn email_enabled(&self) -> bool {
        self.enabled && is_set(self.resend_api_key.as_ref())
    }

    pub fn whatsapp_enabled(&self) -> bool {
        self.enabled && self.whatsapp_api_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if !self.email_enabled() && !self.whatsapp_enabled() {
            return Err(ValidationError::NoNotificationChannel);
        }
        if self.email_enabled() {
            let key = self.resend_api_key.as_ref().map(|k| k.expose_secret().as_str());
            if !key.unwrap_or_default().starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
            if !self.from_email.contains('@') {
                return Err(ValidationError::InvalidFromEmail);
            }
        }
        if self.whatsapp_enabled() {
            let url = self.whatsapp_api_url.as_deref().unwrap_or_default();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidWhatsAppUrl);
            }
            if !is_set(self.whatsapp_token.as_ref()) {
                return Err(ValidationError::MissingRequired("NOTIFICATIONS__WHATSAPP_TOKEN"));
            }
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            resend_api_key: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
            whatsapp_api_url: None,
            whatsapp_token: None,
        }
    }
}

fn is_set(secret: Option<&SecretString>) -> bool {
    secret.is_some_and(|s| !s.expose_secret().is_empty())
}

fn default_from_email() -> String {
    "recepcion@example.com".to_string()
}

fn default_from_name() -> String {
    "Recepción".to_string()
}
