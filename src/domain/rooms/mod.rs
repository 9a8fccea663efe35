//! Rooms domain module.
//!
//! Rooms, the reservations and rentals that hold them, and the overlap rule
//! that keeps a room from being booked twice.

mod availability;
mod booking;
mod errors;
mod room;

pub use availability::{evaluate, Availability};
pub use booking::{
    BookingKind, BookingSlot, NewRental, NewReservation, PaymentType, Rental, RentalStatus,
    Reservation, ReservationStatus, StayWindow,
};
pub use errors::BookingError;
pub use room::{Room, RoomStatus};
