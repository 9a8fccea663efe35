//! Reservations, rentals and the time windows they occupy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{
    ContactInfo, Money, RentalId, ReservationId, RoomId, StateMachine, Timestamp, ValidationError,
};

/// Half-open interval `[check_in, check_out)` a booking holds a room for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayWindow {
    check_in: Timestamp,
    check_out: Timestamp,
}

impl StayWindow {
    /// Check-out must be strictly after check-in.
    pub fn new(check_in: Timestamp, check_out: Timestamp) -> Result<Self, ValidationError> {
        if !check_out.is_after(&check_in) {
            return Err(ValidationError::invalid_format(
                "fecha_salida",
                "check-out must be after check-in",
            ));
        }
        Ok(Self { check_in, check_out })
    }

    /// Parses raw form values for both ends of the window.
    pub fn parse(check_in: Option<&str>, check_out: Option<&str>) -> Result<Self, ValidationError> {
        let check_in = match check_in.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Timestamp::parse("fecha_entrada", raw)?,
            None => return Err(ValidationError::empty_field("fecha_entrada")),
        };
        let check_out = match check_out.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Timestamp::parse("fecha_salida", raw)?,
            None => return Err(ValidationError::empty_field("fecha_salida")),
        };
        Self::new(check_in, check_out)
    }

    pub fn check_in(&self) -> Timestamp {
        self.check_in
    }

    pub fn check_out(&self) -> Timestamp {
        self.check_out
    }

    /// Two windows overlap when each starts before the other ends.
    /// Touching boundaries do not overlap.
    pub fn overlaps(&self, other: &StayWindow) -> bool {
        other.check_in.is_before(&self.check_out) && other.check_out.is_after(&self.check_in)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Active,
    Cancelled,
    /// Turned into a rental at check-in.
    Converted,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Active => "active",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Converted => "converted",
        }
    }

    pub fn from_db(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(ReservationStatus::Active),
            "cancelled" => Some(ReservationStatus::Cancelled),
            "converted" => Some(ReservationStatus::Converted),
            _ => None,
        }
    }
}

impl StateMachine for ReservationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ReservationStatus::Active => {
                vec![ReservationStatus::Cancelled, ReservationStatus::Converted]
            }
            ReservationStatus::Cancelled | ReservationStatus::Converted => vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    Active,
    Finished,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Active => "active",
            RentalStatus::Finished => "finished",
        }
    }

    pub fn from_db(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(RentalStatus::Active),
            "finished" => Some(RentalStatus::Finished),
            _ => None,
        }
    }
}

impl StateMachine for RentalStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            RentalStatus::Active => vec![RentalStatus::Finished],
            RentalStatus::Finished => vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Card,
    Transfer,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "cash",
            PaymentType::Card => "card",
            PaymentType::Transfer => "transfer",
        }
    }
}

impl FromStr for PaymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "efectivo" => Ok(PaymentType::Cash),
            "card" | "tarjeta" => Ok(PaymentType::Card),
            "transfer" | "transferencia" => Ok(PaymentType::Transfer),
            "" => Err(ValidationError::empty_field("tipo_pago")),
            other => Err(ValidationError::invalid_format(
                "tipo_pago",
                format!("unknown payment type '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub room_id: RoomId,
    pub client: ContactInfo,
    pub window: StayWindow,
    pub deposit: Money,
    pub receipt_path: Option<String>,
    pub qr_path: Option<String>,
    pub status: ReservationStatus,
    pub created_at: Timestamp,
}

impl Reservation {
    /// Whether this reservation still holds its room.
    pub fn blocks_room(&self) -> bool {
        self.status == ReservationStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub room_id: RoomId,
    pub client: ContactInfo,
    pub window: StayWindow,
    pub deposit: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub id: RentalId,
    pub room_id: RoomId,
    pub reservation_id: Option<ReservationId>,
    pub client: ContactInfo,
    pub window: StayWindow,
    pub payment_type: PaymentType,
    pub amount: Money,
    pub receipt_path: Option<String>,
    pub qr_path: Option<String>,
    pub status: RentalStatus,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRental {
    pub room_id: RoomId,
    pub reservation_id: Option<ReservationId>,
    pub client: ContactInfo,
    pub window: StayWindow,
    pub payment_type: PaymentType,
    pub amount: Money,
}

/// Which table a blocking booking comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    Reservation,
    Rental,
}

/// A booking that currently holds a room: a non-cancelled, non-converted
/// reservation or an active rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSlot {
    pub kind: BookingKind,
    pub id: i64,
    pub window: StayWindow,
}

impl From<&Reservation> for BookingSlot {
    fn from(r: &Reservation) -> Self {
        Self {
            kind: BookingKind::Reservation,
            id: r.id.value(),
            window: r.window,
        }
    }
}

impl From<&Rental> for BookingSlot {
    fn from(r: &Rental) -> Self {
        Self {
            kind: BookingKind::Rental,
            id: r.id.value(),
            window: r.window,
        }
    }
}
