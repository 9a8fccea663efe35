//! CancelReservationHandler - Command handler releasing a reservation.

use std::sync::Arc;

use crate::domain::foundation::{ReservationId, StateMachine};
use crate::domain::rooms::{BookingError, Reservation, ReservationStatus};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct CancelReservationCommand {
    pub reservation_id: ReservationId,
}

/// Cancelled reservations no longer block their room.
pub struct CancelReservationHandler {
    repository: Arc<dyn BookingRepository>,
}

impl CancelReservationHandler {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CancelReservationCommand) -> Result<Reservation, BookingError> {
        let mut reservation = self
            .repository
            .find_reservation(&cmd.reservation_id)
            .await?
            .ok_or(BookingError::ReservationNotFound(cmd.reservation_id))?;

        let current = reservation.status;
        reservation.status = current
            .transition_to(ReservationStatus::Cancelled)
            .map_err(|_| BookingError::invalid_state("reservation", current.as_str(), "cancel"))?;
        self.repository.update_reservation(&reservation).await?;

        tracing::info!(reservation_id = %reservation.id, "reservation cancelled");
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::fixtures::{booking_store, contact, window};
    use crate::domain::foundation::{Money, RoomId};
    use crate::domain::rooms::NewReservation;

    #[tokio::test]
    async fn cancelled_reservation_frees_the_room() {
        let store = booking_store().await;
        let stay = window("2024-03-01T14:00", "2024-03-03T12:00");
        let reservation = store
            .save_reservation(&NewReservation {
                room_id: RoomId::new(1),
                client: contact(),
                window: stay,
                deposit: Money::ZERO,
            })
            .await
            .unwrap();
        let handler = CancelReservationHandler::new(Arc::new(store.clone()));

        let cancelled = handler
            .handle(CancelReservationCommand { reservation_id: reservation.id })
            .await
            .unwrap();

        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        let blocking = store
            .find_overlapping_bookings(&RoomId::new(1), &stay, None)
            .await
            .unwrap();
        assert!(blocking.is_empty());
    }

    #[tokio::test]
    async fn cannot_cancel_twice() {
        let store = booking_store().await;
        let reservation = store
            .save_reservation(&NewReservation {
                room_id: RoomId::new(1),
                client: contact(),
                window: window("2024-03-01T14:00", "2024-03-03T12:00"),
                deposit: Money::ZERO,
            })
            .await
            .unwrap();
        let handler = CancelReservationHandler::new(Arc::new(store));
        let cmd = CancelReservationCommand { reservation_id: reservation.id };

        handler.handle(cmd.clone()).await.unwrap();
        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, BookingError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn unknown_reservation_is_not_found() {
        let handler = CancelReservationHandler::new(Arc::new(booking_store().await));
        let err = handler
            .handle(CancelReservationCommand { reservation_id: ReservationId::new(8) })
            .await
            .unwrap_err();
        assert_eq!(err, BookingError::ReservationNotFound(ReservationId::new(8)));
    }
}
