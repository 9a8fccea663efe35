//! Receipt output configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where generated receipts and QR files go.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptConfig {
    /// Directory receipts are written under
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// URL prefix the output directory is served from
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

impl ReceiptConfig {
    /// Validate receipt configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyReceiptDir);
        }
        Ok(())
    }
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            public_prefix: default_public_prefix(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("storage")
}

fn default_public_prefix() -> String {
    "/static".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_config_defaults() {
        let config = ReceiptConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("storage"));
        assert_eq!(config.public_prefix, "/static");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_dir() {
        let config = ReceiptConfig {
            output_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
