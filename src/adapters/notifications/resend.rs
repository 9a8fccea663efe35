//! Resend e-mail notifier.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, Notifier};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize, PartialEq, Eq)]
struct EmailAttachment {
    filename: String,
    path: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct EmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<EmailAttachment>,
}

pub struct ResendNotifier {
    api_key: SecretString,
    from: String,
    api_url: String,
    http_client: reqwest::Client,
}

impl ResendNotifier {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            from: from.into(),
            api_url: RESEND_API_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set a custom API URL (for testing).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Builds the request body, or `None` when the client left no e-mail.
    ///
    /// Resend can only fetch attachments from a URL; local paths are
    /// mentioned in the body instead.
    fn build_request(&self, notification: &Notification) -> Option<EmailRequest> {
        let to = notification.email.clone()?;
        let mut text = format!("Hola {},\n\n{}", notification.recipient_name, notification.body);
        let mut attachments = Vec::new();

        if let Some(path) = &notification.attachment_path {
            if path.starts_with("http://") || path.starts_with("https://") {
                let filename = path.rsplit('/').next().unwrap_or(path).to_string();
                attachments.push(EmailAttachment {
                    filename,
                    path: path.clone(),
                });
            } else {
                text.push_str(&format!("\n\nComprobante: {}", path));
            }
        }

        Some(EmailRequest {
            from: self.from.clone(),
            to: vec![to],
            subject: notification.subject.clone(),
            text,
            attachments,
        })
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError> {
        let Some(request) = self.build_request(notification) else {
            tracing::debug!(
                recipient = %notification.recipient_name,
                "no e-mail address, skipping"
            );
            return Ok(());
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("Resend request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Resend returned {}: {}", status, body),
            ));
        }
        Ok(())
    }
}
