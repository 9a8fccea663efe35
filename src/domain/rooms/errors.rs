//! Booking error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | RoomNotFound, ReservationNotFound, RentalNotFound | 404 |
//! | RoomUnavailable | 409 |
//! | InvalidState, Conflict | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, RentalId, ReservationId, RoomId, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    #[error("Reservation {0} not found")]
    ReservationNotFound(ReservationId),

    #[error("Rental {0} not found")]
    RentalNotFound(RentalId),

    #[error("Room {0} is already booked for the selected dates")]
    RoomUnavailable(RoomId),

    #[error("Cannot {attempted} a {entity} that is {current}")]
    InvalidState {
        entity: &'static str,
        current: String,
        attempted: &'static str,
    },

    /// State changed under a concurrent request, detected by the store.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),

    #[error("{0}")]
    Infrastructure(String),
}

impl BookingError {
    pub fn invalid_state(
        entity: &'static str,
        current: impl Into<String>,
        attempted: &'static str,
    ) -> Self {
        BookingError::InvalidState {
            entity,
            current: current.into(),
            attempted,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::RoomNotFound(_) => ErrorCode::RoomNotFound,
            BookingError::ReservationNotFound(_) => ErrorCode::ReservationNotFound,
            BookingError::RentalNotFound(_) => ErrorCode::RentalNotFound,
            BookingError::RoomUnavailable(_) => ErrorCode::RoomUnavailable,
            BookingError::InvalidState { .. } | BookingError::Conflict(_) => {
                ErrorCode::InvalidStateTransition
            }
            BookingError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err.details.get("field").cloned().unwrap_or_default();
                BookingError::ValidationFailed(ValidationError::invalid_format(field, err.message))
            }
            ErrorCode::RoomUnavailable => {
                match err.details.get("room_id").and_then(|id| id.parse().ok()) {
                    Some(id) => BookingError::RoomUnavailable(RoomId::new(id)),
                    None => BookingError::Conflict(err.message),
                }
            }
            ErrorCode::InvalidStateTransition => BookingError::Conflict(err.message),
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}

/// Lets stores report booking rule violations they detect while writing.
impl From<BookingError> for DomainError {
    fn from(err: BookingError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            BookingError::RoomUnavailable(id) => domain.with_detail("room_id", id.to_string()),
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_room_message() {
        let err = BookingError::RoomUnavailable(RoomId::new(3));
        assert_eq!(err.to_string(), "Room 3 is already booked for the selected dates");
        assert_eq!(err.code(), ErrorCode::RoomUnavailable);
    }

    #[test]
    fn unavailable_room_survives_the_port_boundary() {
        let domain: DomainError = BookingError::RoomUnavailable(RoomId::new(3)).into();
        assert_eq!(domain.code, ErrorCode::RoomUnavailable);

        let back: BookingError = domain.into();
        assert_eq!(back, BookingError::RoomUnavailable(RoomId::new(3)));
    }

    #[test]
    fn store_detected_state_change_is_a_conflict() {
        let domain: DomainError =
            BookingError::invalid_state("reservation", "cancelled", "convert").into();
        let back: BookingError = domain.into();
        assert_eq!(
            back,
            BookingError::Conflict("Cannot convert a reservation that is cancelled".to_string())
        );
        assert_eq!(back.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn invalid_state_message() {
        let err = BookingError::invalid_state("reservation", "cancelled", "convert");
        assert_eq!(err.to_string(), "Cannot convert a reservation that is cancelled");
    }
}
