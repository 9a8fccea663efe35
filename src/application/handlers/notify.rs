//! Fire-and-forget client notifications.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::ports::{Notification, Notifier};

/// Sends `notification` on a detached task. Failures are logged and never
/// reach the request that triggered them.
pub fn spawn_notification(
    notifier: Arc<dyn Notifier>,
    notification: Notification,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.send(&notification).await {
            Ok(()) => {
                tracing::debug!(recipient = %notification.recipient_name, "notification sent")
            }
            Err(err) => tracing::warn!(
                recipient = %notification.recipient_name,
                error = %err,
                "notification failed"
            ),
        }
    })
}
