//! Entrance QR codes for memberships.

use crate::domain::membership::ActiveMembership;
use crate::ports::{ReceiptGenerator, ReceiptKind};

/// Generates the QR code (it encodes the membership id) and stores its path
/// on `membership`. Returns false if generation failed; the caller decides
/// whether to persist.
pub(super) async fn attach_qr(
    receipts: &dyn ReceiptGenerator,
    membership: &mut ActiveMembership,
) -> bool {
    let payload = membership.id.to_string();
    match receipts
        .generate_qr(ReceiptKind::Membresia, membership.id.value(), &payload)
        .await
    {
        Ok(path) => {
            membership.qr_path = Some(path);
            true
        }
        Err(err) => {
            tracing::warn!(membership_id = %membership.id, error = %err, "QR generation failed");
            false
        }
    }
}
