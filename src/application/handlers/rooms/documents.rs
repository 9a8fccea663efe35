//! Receipts, QR codes and notifications issued after a booking.

use std::sync::Arc;

use crate::application::handlers::notify::spawn_notification;
use crate::domain::foundation::{ContactInfo, Timestamp};
use crate::ports::{Notification, Notifier, ReceiptData, ReceiptGenerator, ReceiptKind};

/// Paths of the documents issued for one booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct IssuedDocuments {
    pub receipt_path: Option<String>,
    pub qr_path: Option<String>,
}

/// Generates the receipt and QR code. A document that fails to render is
/// logged and left out; the booking itself is already stored.
pub(super) async fn issue_documents(
    receipts: &dyn ReceiptGenerator,
    kind: ReceiptKind,
    data: &ReceiptData,
) -> IssuedDocuments {
    let receipt_path = match receipts.generate_receipt(kind, data).await {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::error!(
                kind = kind.as_str(),
                folio = data.folio,
                error = %err,
                "receipt generation failed"
            );
            None
        }
    };
    let qr_path = match receipts
        .generate_qr(kind, data.folio, &format!("{}:{}", kind.as_str(), data.folio))
        .await
    {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::error!(
                kind = kind.as_str(),
                folio = data.folio,
                error = %err,
                "QR generation failed"
            );
            None
        }
    };
    IssuedDocuments {
        receipt_path,
        qr_path,
    }
}

/// Sends the receipt to the client in the background.
pub(super) fn notify_client(
    notifier: &Arc<dyn Notifier>,
    client: &ContactInfo,
    subject: &str,
    body: String,
    attachment: Option<String>,
) {
    let notification = Notification::for_contact(client, subject, body).with_attachment(attachment);
    spawn_notification(Arc::clone(notifier), notification);
}

/// Date and time as printed on receipts and messages.
pub(super) fn stamp(ts: &Timestamp) -> String {
    ts.as_datetime().format("%Y-%m-%d %H:%M").to_string()
}
