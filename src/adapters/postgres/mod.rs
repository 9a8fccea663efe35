//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresMembershipRepository` - Catalog, memberships and members
//! - `PostgresBookingRepository` - Rooms, reservations and rentals
//! - `PostgresAccessLogRepository` - Append-only scan log
//!
//! Schema lives in `migrations/`.

mod access_log_repository;
mod booking_repository;
mod membership_repository;

pub use access_log_repository::PostgresAccessLogRepository;
pub use booking_repository::PostgresBookingRepository;
pub use membership_repository::PostgresMembershipRepository;

use crate::domain::foundation::{DomainError, Money};

/// Wraps a driver error, logging the detail.
fn database_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |err| {
        tracing::error!(error = %err, "{}", context);
        DomainError::database(format!("{}: {}", context, err))
    }
}

/// A stored value that no longer satisfies domain rules.
fn corrupt_row(what: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid {} in database: {}", what, detail))
}

fn money_from_db(what: &str, cents: i64) -> Result<Money, DomainError> {
    Money::from_cents(cents).map_err(|e| corrupt_row(what, e))
}
