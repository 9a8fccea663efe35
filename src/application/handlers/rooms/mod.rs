//! Room handlers.
//!
//! ## Commands
//! - Reservations: create, cancel
//! - Rentals: create (walk-in or from a reservation), finish
//! - Housekeeping: mark a room available
//!
//! ## Queries
//! - Availability for a time window

mod cancel_reservation;
mod check_availability;
mod create_rental;
mod create_reservation;
mod documents;
mod finish_rental;
mod mark_room_available;

// Commands
pub use cancel_reservation::{CancelReservationCommand, CancelReservationHandler};
pub use create_rental::{CreateRentalCommand, CreateRentalHandler};
pub use create_reservation::{CreateReservationCommand, CreateReservationHandler};
pub use finish_rental::{FinishRentalCommand, FinishRentalHandler};
pub use mark_room_available::{MarkRoomAvailableCommand, MarkRoomAvailableHandler};

// Queries
pub use check_availability::{CheckAvailabilityHandler, CheckAvailabilityQuery};
