//! CreateRentalHandler - Command handler for checking a guest in.

use std::sync::Arc;

use crate::domain::foundation::{
    ContactInfo, Money, ReservationId, RoomId, StateMachine, ValidationError,
};
use crate::domain::rooms::{
    BookingError, NewRental, PaymentType, Rental, ReservationStatus, RoomStatus, StayWindow,
};
use crate::ports::{BookingRepository, Notifier, ReceiptData, ReceiptGenerator, ReceiptKind};

use super::check_availability::{check, CheckAvailabilityQuery};
use super::documents::{issue_documents, notify_client, stamp};

#[derive(Debug, Clone)]
pub struct CreateRentalCommand {
    pub room_id: RoomId,
    pub client: ContactInfo,
    pub window: StayWindow,
    pub payment_type: PaymentType,
    pub amount: Money,
    /// Reservation being turned into this rental, if any.
    pub reservation_id: Option<ReservationId>,
}

/// Handler for rentals, walk-in or from a reservation.
///
/// The source reservation is excluded from the availability check and
/// marked converted; the room becomes occupied.
pub struct CreateRentalHandler {
    repository: Arc<dyn BookingRepository>,
    receipts: Arc<dyn ReceiptGenerator>,
    notifier: Arc<dyn Notifier>,
}

impl CreateRentalHandler {
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

    pub async fn handle(&self, cmd: CreateRentalCommand) -> Result<Rental, BookingError> {
        // 1. Room must exist and be ready
        let room = self
            .repository
            .find_room(&cmd.room_id)
            .await?
            .ok_or(BookingError::RoomNotFound(cmd.room_id))?;
        room.status
            .transition_to(RoomStatus::Occupied)
            .map_err(|_| BookingError::invalid_state("room", room.status.as_str(), "rent"))?;

        // 2. Source reservation must be active and for this room
        if let Some(id) = cmd.reservation_id {
            let reservation = self
                .repository
                .find_reservation(&id)
                .await?
                .ok_or(BookingError::ReservationNotFound(id))?;
            if reservation.room_id != cmd.room_id {
                return Err(ValidationError::invalid_format(
                    "id_reservacion",
                    format!("reservation {} is for another room", id),
                )
                .into());
            }
            if reservation.status != ReservationStatus::Active {
                return Err(BookingError::invalid_state(
                    "reservation",
                    reservation.status.as_str(),
                    "convert",
                ));
            }
        }

        // 3. Window must be free apart from the source reservation
        let availability = check(
            self.repository.as_ref(),
            &CheckAvailabilityQuery {
                room_id: cmd.room_id,
                window: cmd.window,
                exclude_reservation_id: cmd.reservation_id,
            },
        )
        .await?;
        if !availability.available {
            return Err(BookingError::RoomUnavailable(cmd.room_id));
        }

        // 4. Persist rental, convert reservation, occupy room as one write.
        // The store re-checks overlap so a concurrent booking loses here.
        let mut rental = self
            .repository
            .save_rental(&NewRental {
                room_id: cmd.room_id,
                reservation_id: cmd.reservation_id,
                client: cmd.client,
                window: cmd.window,
                payment_type: cmd.payment_type,
                amount: cmd.amount,
            })
            .await?;
        tracing::info!(
            rental_id = %rental.id,
            room = %room.number,
            from_reservation = ?rental.reservation_id,
            "rental created"
        );

        // 5. Receipt and QR code
        let data = ReceiptData {
            folio: rental.id.value(),
            client_name: rental.client.name.clone(),
            concept: format!("Renta habitación {}", room.number),
            amount: rental.amount,
            details: vec![
                ("Habitación".to_string(), format!("{} ({})", room.number, room.room_type)),
                ("Entrada".to_string(), stamp(&rental.window.check_in())),
                ("Salida".to_string(), stamp(&rental.window.check_out())),
                ("Forma de pago".to_string(), rental.payment_type.as_str().to_string()),
            ],
        };
        let documents = issue_documents(self.receipts.as_ref(), ReceiptKind::Renta, &data).await;
        rental.receipt_path = documents.receipt_path;
        rental.qr_path = documents.qr_path;
        self.repository.update_rental(&rental).await?;

        // 6. Let the client know
        notify_client(
            &self.notifier,
            &rental.client,
            "Comprobante de renta",
            format!(
                "Bienvenido. Habitación {} hasta el {}. Total pagado: ${}.",
                room.number,
                stamp(&rental.window.check_out()),
                rental.amount
            ),
            rental.receipt_path.clone(),
        );

        Ok(rental)
    }
}
