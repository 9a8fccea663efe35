//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | TypeNotFound | 404 |
//! | TooManyMembers | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, MembershipId, MembershipTypeId, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    #[error("Membership {0} not found")]
    NotFound(MembershipId),

    #[error("Membership type {0} not found")]
    TypeNotFound(MembershipTypeId),

    #[error("This membership type allows at most {max} members, got {actual}")]
    TooManyMembers { max: u32, actual: usize },

    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),

    #[error("{0}")]
    Infrastructure(String),
}

impl MembershipError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) => ErrorCode::MembershipNotFound,
            MembershipError::TypeNotFound(_) => ErrorCode::MembershipTypeNotFound,
            MembershipError::TooManyMembers { .. } | MembershipError::ValidationFailed(_) => {
                ErrorCode::ValidationFailed
            }
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err.details.get("field").cloned().unwrap_or_default();
                MembershipError::ValidationFailed(ValidationError::invalid_format(
                    field,
                    err.message,
                ))
            }
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}
