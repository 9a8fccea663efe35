//! HTTP DTOs for room, reservation and rental endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContactInfo, Money, RentalId, ReservationId, RoomId, Timestamp, ValidationError,
};
use crate::domain::rooms::{
    Availability, BookingSlot, PaymentType, Rental, RentalStatus, Reservation, ReservationStatus,
    Room, RoomStatus, StayWindow,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string of `GET /api/rooms/:id/availability`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AvailabilityParams {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub exclude_reservation_id: Option<String>,
}

impl AvailabilityParams {
    pub fn window(&self) -> Result<StayWindow, ValidationError> {
        StayWindow::parse(self.check_in.as_deref(), self.check_out.as_deref())
    }

    pub fn exclude(&self) -> Result<Option<ReservationId>, ValidationError> {
        match self.exclude_reservation_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Ok(Some(raw.parse()?)),
            _ => Ok(None),
        }
    }
}

/// Client fields shared by reservation and rental forms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientFields {
    pub nombre: String,
    pub telefono: String,
    pub email: Option<String>,
    pub fecha_entrada: Option<String>,
    pub fecha_salida: Option<String>,
}

impl ClientFields {
    pub fn contact(&self) -> Result<ContactInfo, ValidationError> {
        ContactInfo::new(&self.nombre, &self.telefono, self.email.as_deref())
    }

    pub fn window(&self) -> Result<StayWindow, ValidationError> {
        StayWindow::parse(self.fecha_entrada.as_deref(), self.fecha_salida.as_deref())
    }
}

/// Body of `POST /api/reservations`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationRequest {
    pub id_habitacion: RoomId,
    #[serde(flatten)]
    pub client: ClientFields,
    #[serde(default)]
    pub anticipo: Money,
}

/// Body of `POST /api/rentals`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRentalRequest {
    pub id_habitacion: RoomId,
    #[serde(flatten)]
    pub client: ClientFields,
    /// `efectivo`, `tarjeta`, `transferencia` (or the English names).
    #[serde(default)]
    pub tipo_pago: String,
    pub monto: Money,
    /// Set when the guest arrives with a reservation.
    #[serde(default)]
    pub id_reservacion: Option<ReservationId>,
}

impl CreateRentalRequest {
    pub fn payment_type(&self) -> Result<PaymentType, ValidationError> {
        self.tipo_pago.parse()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub conflicts: Vec<BookingSlot>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(a: Availability) -> Self {
        Self {
            available: a.available,
            conflicts: a.conflicts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub id_habitacion: RoomId,
    pub nombre: String,
    pub telefono: String,
    pub email: Option<String>,
    pub fecha_entrada: Timestamp,
    pub fecha_salida: Timestamp,
    pub anticipo: Money,
    pub estado: ReservationStatus,
    pub recibo: Option<String>,
    pub qr: Option<String>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            id_habitacion: r.room_id,
            nombre: r.client.name,
            telefono: r.client.phone,
            email: r.client.email,
            fecha_entrada: r.window.check_in(),
            fecha_salida: r.window.check_out(),
            anticipo: r.deposit,
            estado: r.status,
            recibo: r.receipt_path,
            qr: r.qr_path,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RentalResponse {
    pub id: RentalId,
    pub id_habitacion: RoomId,
    pub id_reservacion: Option<ReservationId>,
    pub nombre: String,
    pub telefono: String,
    pub email: Option<String>,
    pub fecha_entrada: Timestamp,
    pub fecha_salida: Timestamp,
    pub tipo_pago: PaymentType,
    pub monto: Money,
    pub estado: RentalStatus,
    pub recibo: Option<String>,
    pub qr: Option<String>,
}

impl From<Rental> for RentalResponse {
    fn from(r: Rental) -> Self {
        Self {
            id: r.id,
            id_habitacion: r.room_id,
            id_reservacion: r.reservation_id,
            nombre: r.client.name,
            telefono: r.client.phone,
            email: r.client.email,
            fecha_entrada: r.window.check_in(),
            fecha_salida: r.window.check_out(),
            tipo_pago: r.payment_type,
            monto: r.amount,
            estado: r.status,
            recibo: r.receipt_path,
            qr: r.qr_path,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomResponse {
    pub id: RoomId,
    pub numero: String,
    pub tipo: String,
    pub precio_noche: Money,
    pub estado: RoomStatus,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            numero: room.number,
            tipo: room.room_type,
            precio_noche: room.price_per_night,
            estado: room.status,
        }
    }
}
