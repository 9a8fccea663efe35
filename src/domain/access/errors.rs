//! Access control error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// 404: the QR code names no membership.
    #[error("Membership {0} not found")]
    NotFound(MembershipId),

    /// 400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),

    /// 500, not retried.
    #[error("{0}")]
    Infrastructure(String),
}

impl AccessError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AccessError::NotFound(_) => ErrorCode::MembershipNotFound,
            AccessError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            AccessError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for AccessError {
    fn from(err: DomainError) -> Self {
        AccessError::Infrastructure(err.to_string())
    }
}
