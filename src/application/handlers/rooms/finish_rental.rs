//! FinishRentalHandler - Command handler for check-out.

use std::sync::Arc;

use crate::domain::foundation::{RentalId, StateMachine};
use crate::domain::rooms::{BookingError, Rental, RentalStatus, RoomStatus};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct FinishRentalCommand {
    pub rental_id: RentalId,
}

/// Marks the rental finished and sends the room to cleaning.
pub struct FinishRentalHandler {
    repository: Arc<dyn BookingRepository>,
}

impl FinishRentalHandler {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: FinishRentalCommand) -> Result<Rental, BookingError> {
        let mut rental = self
            .repository
            .find_rental(&cmd.rental_id)
            .await?
            .ok_or(BookingError::RentalNotFound(cmd.rental_id))?;

        let current = rental.status;
        rental.status = current
            .transition_to(RentalStatus::Finished)
            .map_err(|_| BookingError::invalid_state("rental", current.as_str(), "finish"))?;
        self.repository.update_rental(&rental).await?;
        self.repository
            .set_room_status(&rental.room_id, RoomStatus::Cleaning)
            .await?;

        tracing::info!(
            rental_id = %rental.id,
            room_id = %rental.room_id,
            "rental finished, room to cleaning"
        );
        Ok(rental)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::fixtures::{booking_store, contact, window};
    use crate::domain::foundation::{Money, RoomId};
    use crate::domain::rooms::{NewRental, PaymentType};

    #[tokio::test]
    async fn finishing_sends_room_to_cleaning() {
        let store = booking_store().await;
        store.set_room_status(&RoomId::new(1), RoomStatus::Occupied).await.unwrap();
        let rental = store
            .save_rental(&NewRental {
                room_id: RoomId::new(1),
                reservation_id: None,
                client: contact(),
                window: window("2024-03-01T14:00", "2024-03-03T12:00"),
                payment_type: PaymentType::Cash,
                amount: Money::from_pesos(850).unwrap(),
            })
            .await
            .unwrap();
        let handler = FinishRentalHandler::new(Arc::new(store.clone()));

        let finished = handler
            .handle(FinishRentalCommand { rental_id: rental.id })
            .await
            .unwrap();

        assert_eq!(finished.status, RentalStatus::Finished);
        assert_eq!(store.room(RoomId::new(1)).await.unwrap().status, RoomStatus::Cleaning);

        let err = handler
            .handle(FinishRentalCommand { rental_id: rental.id })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn unknown_rental_is_not_found() {
        let handler = FinishRentalHandler::new(Arc::new(booking_store().await));
        let err = handler
            .handle(FinishRentalCommand { rental_id: RentalId::new(3) })
            .await
            .unwrap_err();
        assert_eq!(err, BookingError::RentalNotFound(RentalId::new(3)));
    }
}
