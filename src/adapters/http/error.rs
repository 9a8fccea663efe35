//! JSON error rendering shared by every endpoint.
//!
//! | Error code | HTTP Status |
//! |------------|-------------|
//! | VALIDATION_FAILED | 400 |
//! | *_NOT_FOUND | 404 |
//! | ROOM_UNAVAILABLE, INVALID_STATE_TRANSITION | 409 |
//! | anything else | 500 |

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::access::AccessError;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::membership::MembershipError;
use crate::domain::rooms::BookingError;

/// Message shown to clients for server-side failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Error body: `{ "error": message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::MembershipNotFound
            | ErrorCode::MembershipTypeNotFound
            | ErrorCode::RoomNotFound
            | ErrorCode::ReservationNotFound
            | ErrorCode::RentalNotFound => StatusCode::NOT_FOUND,
            ErrorCode::RoomUnavailable | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::StorageError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status.is_server_error() {
            tracing::error!(code = %self.code, error = %self.message, "request failed");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.message
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorCode::ValidationFailed, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(ErrorCode::ValidationFailed, rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MembershipId, RoomId};

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_are_400_with_field_message() {
        let err: ApiError = ValidationError::empty_field("fecha_inicio").into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await.error, "Field 'fecha_inicio' cannot be empty");
    }

    #[test]
    fn not_found_is_404() {
        let err: ApiError = MembershipError::NotFound(MembershipId::new(3)).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn booked_room_is_409() {
        let err: ApiError = BookingError::RoomUnavailable(RoomId::new(1)).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let err: ApiError = AccessError::Infrastructure("pool timed out".to_string()).into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await.error, INTERNAL_ERROR_MESSAGE);
    }
}
