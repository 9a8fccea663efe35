//! Notifier port - e-mail and WhatsApp delivery of receipts.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{ContactInfo, DomainError};

/// A message for one client. Each channel uses the address it needs and
/// skips the message when the client didn't give one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub recipient_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
    pub attachment_path: Option<String>,
}

impl Notification {
    pub fn for_contact(
        contact: &ContactInfo,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient_name: contact.name.clone(),
            email: contact.email.clone(),
            phone: Some(contact.phone.clone()),
            subject: subject.into(),
            body: body.into(),
            attachment_path: None,
        }
    }

    pub fn with_attachment(mut self, path: Option<String>) -> Self {
        self.attachment_path = path;
        self
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError>;
}
