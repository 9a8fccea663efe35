//! CreateReservationHandler - Command handler for booking a room ahead.

use std::sync::Arc;

use crate::domain::foundation::{ContactInfo, Money, RoomId};
use crate::domain::rooms::{BookingError, NewReservation, Reservation, StayWindow};
use crate::ports::{BookingRepository, Notifier, ReceiptData, ReceiptGenerator, ReceiptKind};

use super::check_availability::{check, CheckAvailabilityQuery};
use super::documents::{issue_documents, notify_client, stamp};

#[derive(Debug, Clone)]
pub struct CreateReservationCommand {
    pub room_id: RoomId,
    pub client: ContactInfo,
    pub window: StayWindow,
    pub deposit: Money,
}

pub struct CreateReservationHandler {
    repository: Arc<dyn BookingRepository>,
    receipts: Arc<dyn ReceiptGenerator>,
    notifier: Arc<dyn Notifier>,
}

impl CreateReservationHandler {
    pub fn new(
        repository: Arc<dyn BookingRepository>,
        receipts: Arc<dyn ReceiptGenerator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            receipts,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: CreateReservationCommand) -> Result<Reservation, BookingError> {
        // 1. Room must exist
        let room = self
            .repository
            .find_room(&cmd.room_id)
            .await?
            .ok_or(BookingError::RoomNotFound(cmd.room_id))?;

        // 2. Window must be free
        let availability = check(
            self.repository.as_ref(),
            &CheckAvailabilityQuery {
                room_id: cmd.room_id,
                window: cmd.window,
                exclude_reservation_id: None,
            },
        )
        .await?;
        if !availability.available {
            tracing::info!(room_id = %cmd.room_id, "reservation rejected, room already booked");
            return Err(BookingError::RoomUnavailable(cmd.room_id));
        }

        // 3. Persist
        let mut reservation = self
            .repository
            .save_reservation(&NewReservation {
                room_id: cmd.room_id,
                client: cmd.client,
                window: cmd.window,
                deposit: cmd.deposit,
            })
            .await?;
        tracing::info!(
            reservation_id = %reservation.id,
            room = %room.number,
            "reservation created"
        );

        // 4. Receipt and QR code
        let data = ReceiptData {
            folio: reservation.id.value(),
            client_name: reservation.client.name.clone(),
            concept: format!("Reservación habitación {}", room.number),
            amount: reservation.deposit,
            details: vec![
                ("Habitación".to_string(), format!("{} ({})", room.number, room.room_type)),
                ("Entrada".to_string(), stamp(&reservation.window.check_in())),
                ("Salida".to_string(), stamp(&reservation.window.check_out())),
            ],
        };
        let documents =
            issue_documents(self.receipts.as_ref(), ReceiptKind::Reservacion, &data).await;
        reservation.receipt_path = documents.receipt_path;
        reservation.qr_path = documents.qr_path;
        self.repository.update_reservation(&reservation).await?;

        // 5. Let the client know
        notify_client(
            &self.notifier,
            &reservation.client,
            "Confirmación de reservación",
            format!(
                "Tu reservación de la habitación {} del {} al {} está confirmada. Anticipo: ${}.",
                room.number,
                stamp(&reservation.window.check_in()),
                stamp(&reservation.window.check_out()),
                reservation.deposit
            ),
            reservation.receipt_path.clone(),
        );

        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryBookingStore, RecordingNotifier};
    use crate::adapters::receipts::LocalReceiptGenerator;
    use crate::application::handlers::fixtures::{
        booking_store, contact, window, SlowBookingStore,
    };
    use crate::domain::rooms::ReservationStatus;
    use tempfile::TempDir;

    fn handler(
        store: &InMemoryBookingStore,
        dir: &TempDir,
        notifier: &RecordingNotifier,
    ) -> CreateReservationHandler {
        CreateReservationHandler::new(
            Arc::new(store.clone()),
            Arc::new(LocalReceiptGenerator::new(dir.path(), "")),
            Arc::new(notifier.clone()),
        )
    }

    fn command(check_in: &str, check_out: &str) -> CreateReservationCommand {
        CreateReservationCommand {
            room_id: RoomId::new(1),
            client: contact(),
            window: window(check_in, check_out),
            deposit: Money::from_pesos(300).unwrap(),
        }
    }

    #[tokio::test]
    async fn creates_reservation_with_documents() {
        let dir = TempDir::new().unwrap();
        let store = booking_store().await;
        let notifier = RecordingNotifier::new();

        let reservation = handler(&store, &dir, &notifier)
            .handle(command("2024-03-01T14:00", "2024-03-03T12:00"))
            .await
            .unwrap();

        assert_eq!(reservation.status, ReservationStatus::Active);
        assert!(reservation.receipt_path.as_deref().unwrap().starts_with("receipts/reservacion_"));
        assert!(reservation.qr_path.is_some());
        let stored = store.reservation(reservation.id).await.unwrap();
        assert_eq!(stored.receipt_path, reservation.receipt_path);
    }

    #[tokio::test]
    async fn overlapping_reservation_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = booking_store().await;
        let notifier = RecordingNotifier::new();
        let handler = handler(&store, &dir, &notifier);

        handler
            .handle(command("2024-03-01T14:00", "2024-03-03T12:00"))
            .await
            .unwrap();
        let err = handler
            .handle(command("2024-03-02T14:00", "2024-03-04T12:00"))
            .await
            .unwrap_err();

        assert_eq!(err, BookingError::RoomUnavailable(RoomId::new(1)));
    }

    #[tokio::test]
    async fn concurrent_requests_for_same_window_book_once() {
        let dir = TempDir::new().unwrap();
        let store = booking_store().await;
        let handler = CreateReservationHandler::new(
            Arc::new(SlowBookingStore(store.clone())),
            Arc::new(LocalReceiptGenerator::new(dir.path(), "")),
            Arc::new(RecordingNotifier::new()),
        );

        let (first, second) = tokio::join!(
            handler.handle(command("2024-03-01T14:00", "2024-03-03T12:00")),
            handler.handle(command("2024-03-01T14:00", "2024-03-03T12:00")),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| r.as_ref().err() == Some(&BookingError::RoomUnavailable(RoomId::new(1)))));
        let booked = store
            .find_overlapping_bookings(
                &RoomId::new(1),
                &window("2024-03-01T14:00", "2024-03-03T12:00"),
                None,
            )
            .await
            .unwrap();
        assert_eq!(booked.len(), 1);
    }

    #[tokio::test]
    async fn back_to_back_reservations_are_allowed() {
        let dir = TempDir::new().unwrap();
        let store = booking_store().await;
        let notifier = RecordingNotifier::new();
        let handler = handler(&store, &dir, &notifier);

        handler
            .handle(command("2024-03-01T14:00", "2024-03-03T12:00"))
            .await
            .unwrap();
        assert!(handler
            .handle(command("2024-03-03T12:00", "2024-03-04T12:00"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = booking_store().await;
        let notifier = RecordingNotifier::new();

        let err = handler(&store, &dir, &notifier)
            .handle(CreateReservationCommand {
                room_id: RoomId::new(50),
                ..command("2024-03-01T14:00", "2024-03-03T12:00")
            })
            .await
            .unwrap_err();

        assert_eq!(err, BookingError::RoomNotFound(RoomId::new(50)));
    }

    #[tokio::test]
    async fn database_failure_is_infrastructure() {
        let dir = TempDir::new().unwrap();
        let store = InMemoryBookingStore::failing();
        let notifier = RecordingNotifier::new();

        let err = handler(&store, &dir, &notifier)
            .handle(command("2024-03-01T14:00", "2024-03-03T12:00"))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Infrastructure(_)));
    }
}
