//! CheckAvailabilityHandler - Query handler for room availability.

use std::sync::Arc;

use crate::domain::foundation::{ReservationId, RoomId};
use crate::domain::rooms::{evaluate, Availability, BookingError, StayWindow};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct CheckAvailabilityQuery {
    pub room_id: RoomId,
    pub window: StayWindow,
    /// A reservation that should not count against the window, e.g. the
    /// one being converted into a rental.
    pub exclude_reservation_id: Option<ReservationId>,
}

/// Read-only availability check shared by the booking commands.
pub struct CheckAvailabilityHandler {
    repository: Arc<dyn BookingRepository>,
}

impl CheckAvailabilityHandler {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: CheckAvailabilityQuery,
    ) -> Result<Availability, BookingError> {
        if self.repository.find_room(&query.room_id).await?.is_none() {
            return Err(BookingError::RoomNotFound(query.room_id));
        }
        check(self.repository.as_ref(), &query).await
    }
}

/// Overlap query plus the pure decision.
pub(super) async fn check(
    repository: &dyn BookingRepository,
    query: &CheckAvailabilityQuery,
) -> Result<Availability, BookingError> {
    let slots = repository
        .find_overlapping_bookings(&query.room_id, &query.window, query.exclude_reservation_id)
        .await?;
    Ok(evaluate(&query.window, &slots, query.exclude_reservation_id))
}
