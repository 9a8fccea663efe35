//! Receipt Generator Port - printable receipts and QR codes.
//!
//! Rendering (PDF layout, QR bitmaps) lives behind this trait; the
//! application only needs back a path it can store and hand to the client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Money};

/// Which document template to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
    Reservacion,
    Renta,
    Membresia,
}

impl ReceiptKind {
    /// File name prefix and template name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptKind::Reservacion => "reservacion",
            ReceiptKind::Renta => "renta",
            ReceiptKind::Membresia => "membresia",
        }
    }
}

/// Everything printed on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptData {
    /// Record id shown as the folio.
    pub folio: i64,
    pub client_name: String,
    pub concept: String,
    pub amount: Money,
    /// Extra label/value rows (room number, dates, payment type).
    pub details: Vec<(String, String)>,
}

/// Port for producing receipt and QR files.
///
/// # Contract
///
/// - Returned paths are relative to the configured public base path
/// - Generating twice for the same record produces two distinct files
#[async_trait]
pub trait ReceiptGenerator: Send + Sync {
    /// Renders a receipt and returns where it was written.
    async fn generate_receipt(
        &self,
        kind: ReceiptKind,
        data: &ReceiptData,
    ) -> Result<String, DomainError>;

    /// Renders a QR code encoding `payload` and returns where it was written.
    async fn generate_qr(
        &self,
        kind: ReceiptKind,
        folio: i64,
        payload: &str,
    ) -> Result<String, DomainError>;
}
