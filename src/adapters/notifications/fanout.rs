//! Notifier that delivers through every configured channel.

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{Notification, Notifier};

/// Sends to every channel concurrently. A failing channel does not stop
/// the others; the first error is returned after all have finished.
pub struct FanoutNotifier {
    channels: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new(channels: Vec<Arc<dyn Notifier>>) -> Self {
        Self { channels }
    }
}

#[async_trait]
impl Notifier for FanoutNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError> {
        let sends = self.channels.iter().map(|channel| channel.send(notification));
        let results = join_all(sends).await;

        let mut first_error = None;
        for err in results.into_iter().filter_map(Result::err) {
            tracing::warn!(error = %err, "notification channel failed");
            first_error.get_or_insert(err);
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Notifier used when delivery is disabled: logs and drops.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError> {
        tracing::info!(
            recipient = %notification.recipient_name,
            subject = %notification.subject,
            "notifications disabled, message not sent"
        );
        Ok(())
    }
}
