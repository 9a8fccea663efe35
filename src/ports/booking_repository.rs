//! Booking repository port.
//!
//! Rooms, reservations and rentals share one port since the overlap query
//! spans both booking tables.
//!
//! Saving a booking re-checks overlap atomically with the insert, so two
//! concurrent requests for the same window cannot both succeed.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RentalId, ReservationId, RoomId};
use crate::domain::rooms::{
    BookingSlot, NewRental, NewReservation, Rental, Reservation, Room, RoomStatus, StayWindow,
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_room(&self, id: &RoomId) -> Result<Option<Room>, DomainError>;

    /// # Errors
    ///
    /// - `RoomNotFound` if the room doesn't exist
    async fn set_room_status(&self, id: &RoomId, status: RoomStatus) -> Result<(), DomainError>;

    /// Active reservations and active rentals on `room_id` whose window
    /// overlaps `window`, skipping the reservation `exclude` if given.
    ///
    /// Read only.
    async fn find_overlapping_bookings(
        &self,
        room_id: &RoomId,
        window: &StayWindow,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<BookingSlot>, DomainError>;

    /// # Errors
    ///
    /// - `RoomUnavailable` if an active booking overlaps the window at write time
    async fn save_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, DomainError>;

    async fn find_reservation(&self, id: &ReservationId)
        -> Result<Option<Reservation>, DomainError>;

    /// Writes status and document paths back.
    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError>;

    /// Checks the guest in as one unit: inserts the rental, marks the source
    /// reservation (if any) converted and the room occupied. Nothing is
    /// written when any step fails.
    ///
    /// # Errors
    ///
    /// - `RoomUnavailable` if a booking other than the source reservation
    ///   overlaps the window at write time
    /// - `InvalidStateTransition` if the source reservation is no longer active
    /// - `RoomNotFound` if the room doesn't exist
    async fn save_rental(&self, rental: &NewRental) -> Result<Rental, DomainError>;

    async fn find_rental(&self, id: &RentalId) -> Result<Option<Rental>, DomainError>;

    /// Writes status and document paths back.
    async fn update_rental(&self, rental: &Rental) -> Result<(), DomainError>;
}
