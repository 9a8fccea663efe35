//! WhatsApp gateway notifier.
//!
//! Posts `{phone, message, attachment}` as JSON to a configurable HTTP
//! gateway with a bearer token.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, Notifier};

#[derive(Debug, Serialize, PartialEq, Eq)]
struct WhatsAppMessage {
    phone: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment: Option<String>,
}

pub struct WhatsAppNotifier {
    api_url: String,
    token: SecretString,
    http_client: reqwest::Client,
}

impl WhatsAppNotifier {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: SecretString::new(token.into()),
            http_client: reqwest::Client::new(),
        }
    }

    fn build_message(notification: &Notification) -> Option<WhatsAppMessage> {
        let phone = notification.phone.clone()?;
        Some(WhatsAppMessage {
            phone,
            message: format!("*{}*\n{}", notification.subject, notification.body),
            attachment: notification.attachment_path.clone(),
        })
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError> {
        let Some(message) = Self::build_message(notification) else {
            tracing::debug!(recipient = %notification.recipient_name, "no phone number, skipping");
            return Ok(());
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(self.token.expose_secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("WhatsApp gateway request failed: {}", e),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("WhatsApp gateway returned {}", status),
            ));
        }
        Ok(())
    }
}
