//! Local Filesystem Receipt Generator - Implementation of ReceiptGenerator.
//!
//! Writes plain-text receipts and QR payload files under a base directory.
//! Uses atomic writes and stamps each receipt with a SHA-256 checksum.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::pricing::amount_in_words;
use crate::ports::{ReceiptData, ReceiptGenerator, ReceiptKind};

/// Local filesystem receipt generator.
///
/// # Directory Structure
///
/// ```text
/// {base_path}/
/// ├── receipts/
/// │   └── reservacion_12_<uuid>.txt
/// └── qr/
///     └── membresia_5_<uuid>.txt
/// ```
///
/// Returned paths are `{public_prefix}/receipts/...` so they can be served
/// as static files.
#[derive(Debug, Clone)]
pub struct LocalReceiptGenerator {
    base_path: PathBuf,
    public_prefix: String,
}

impl LocalReceiptGenerator {
    pub fn new(base_path: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    fn file_name(kind: ReceiptKind, folio: i64) -> String {
        format!("{}_{}_{}.txt", kind.as_str(), folio, Uuid::new_v4().simple())
    }

    fn public_path(&self, dir: &str, file_name: &str) -> String {
        if self.public_prefix.is_empty() {
            format!("{}/{}", dir, file_name)
        } else {
            format!("{}/{}/{}", self.public_prefix, dir, file_name)
        }
    }

    /// Computes SHA-256 checksum of the given content.
    fn compute_checksum(content: &str) -> String {
        let digest = Sha256::digest(content.as_bytes());
        format!("{:x}", digest)
    }

    fn render_receipt(kind: ReceiptKind, data: &ReceiptData) -> String {
        let title = match kind {
            ReceiptKind::Reservacion => "COMPROBANTE DE RESERVACIÓN",
            ReceiptKind::Renta => "COMPROBANTE DE RENTA",
            ReceiptKind::Membresia => "COMPROBANTE DE MEMBRESÍA",
        };

        let mut body = format!(
            "{}\nFolio: {}\nFecha: {}\nCliente: {}\nConcepto: {}\n",
            title,
            data.folio,
            Timestamp::now().as_datetime().format("%Y-%m-%d %H:%M"),
            data.client_name,
            data.concept,
        );
        for (label, value) in &data.details {
            body.push_str(&format!("{}: {}\n", label, value));
        }
        body.push_str(&format!(
            "Total: ${}\n({})\n",
            data.amount,
            amount_in_words(data.amount)
        ));
        let checksum = Self::compute_checksum(&body);
        body.push_str(&format!("SHA-256: {}\n", checksum));
        body
    }

    /// Write-to-temp-then-rename so readers never see a partial file.
    async fn write_atomic(
        &self,
        dir: &str,
        file_name: &str,
        content: &str,
    ) -> Result<(), DomainError> {
        let dir_path = self.base_path.join(dir);
        fs::create_dir_all(&dir_path)
            .await
            .map_err(|e| storage_error("create directory", &dir_path, e))?;

        let final_path = dir_path.join(file_name);
        let temp_path = dir_path.join(format!("{}.tmp", file_name));

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| storage_error("create", &temp_path, e))?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| storage_error("write", &temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| storage_error("sync", &temp_path, e))?;

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| storage_error("rename", &temp_path, e))?;
        Ok(())
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> DomainError {
    DomainError::new(
        ErrorCode::StorageError,
        format!("Failed to {} {}: {}", action, path.display(), err),
    )
}

#[async_trait]
impl ReceiptGenerator for LocalReceiptGenerator {
    async fn generate_receipt(
        &self,
        kind: ReceiptKind,
        data: &ReceiptData,
    ) -> Result<String, DomainError> {
        let file_name = Self::file_name(kind, data.folio);
        let content = Self::render_receipt(kind, data);
        self.write_atomic("receipts", &file_name, &content).await?;
        tracing::debug!(
            kind = kind.as_str(),
            folio = data.folio,
            file = %file_name,
            "receipt written"
        );
        Ok(self.public_path("receipts", &file_name))
    }

    async fn generate_qr(
        &self,
        kind: ReceiptKind,
        folio: i64,
        payload: &str,
    ) -> Result<String, DomainError> {
        let file_name = Self::file_name(kind, folio);
        self.write_atomic("qr", &file_name, payload).await?;
        Ok(self.public_path("qr", &file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Money;
    use tempfile::TempDir;

    fn data() -> ReceiptData {
        ReceiptData {
            folio: 12,
            client_name: "Ana López".to_string(),
            concept: "Reservación habitación 101".to_string(),
            amount: Money::parse("monto", "121.50").unwrap(),
            details: vec![("Habitación".to_string(), "101".to_string())],
        }
    }

    #[tokio::test]
    async fn writes_receipt_with_amount_in_words() {
        let dir = TempDir::new().unwrap();
        let generator = LocalReceiptGenerator::new(dir.path(), "/static");

        let path = generator
            .generate_receipt(ReceiptKind::Reservacion, &data())
            .await
            .unwrap();

        assert!(path.starts_with("/static/receipts/reservacion_12_"));
        let file_name = path.rsplit('/').next().unwrap();
        let content = std::fs::read_to_string(dir.path().join("receipts").join(file_name)).unwrap();
        assert!(content.contains("ciento veintiuno pesos con cincuenta centavos"));
        assert!(content.contains("Habitación: 101"));
        assert!(content.contains("SHA-256: "));
    }

    #[tokio::test]
    async fn each_receipt_gets_its_own_file() {
        let dir = TempDir::new().unwrap();
        let generator = LocalReceiptGenerator::new(dir.path(), "");

        let first = generator.generate_receipt(ReceiptKind::Renta, &data()).await.unwrap();
        let second = generator.generate_receipt(ReceiptKind::Renta, &data()).await.unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("receipts/renta_12_"));
    }

    #[tokio::test]
    async fn qr_file_holds_payload() {
        let dir = TempDir::new().unwrap();
        let generator = LocalReceiptGenerator::new(dir.path(), "");

        let path = generator.generate_qr(ReceiptKind::Membresia, 5, "5").await.unwrap();

        let content = std::fs::read_to_string(dir.path().join(&path)).unwrap();
        assert_eq!(content, "5");
        assert!(!dir.path().join(format!("{}.tmp", path)).exists());
    }

    #[test]
    fn checksum_is_hex_sha256() {
        let sum = LocalReceiptGenerator::compute_checksum("abc");
        assert_eq!(
            sum,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
