//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, validation rules and error types
//! that form the vocabulary of the back office domain.

mod contact;
mod discount;
mod errors;
mod ids;
mod money;
mod rules;
mod state_machine;
mod timestamp;

pub use contact::{validate_name, ContactInfo, EMAIL_RULES, NAME_RULES, PHONE_RULES};
pub use discount::Discount;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AccessLogId, ClientId, MemberId, MembershipId, MembershipTypeId, RentalId, ReservationId,
    RoomId,
};
pub use money::Money;
pub use rules::{check_field, Rule};
pub use state_machine::StateMachine;
pub use timestamp::{parse_date, today, Timestamp, DATE_FORMAT};
