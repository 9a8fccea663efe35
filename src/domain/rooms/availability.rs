//! Room availability decision.
//!
//! Persistence supplies the bookings currently holding the room; the
//! decision itself is a pure function over them.

use serde::Serialize;

use crate::domain::foundation::ReservationId;

use super::{BookingKind, BookingSlot, StayWindow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub available: bool,
    pub conflicts: Vec<BookingSlot>,
}

/// Decides whether `window` is free among `slots`.
///
/// A reservation matching `exclude` is ignored, so a reservation can be
/// converted to a rental without conflicting with itself.
pub fn evaluate(
    window: &StayWindow,
    slots: &[BookingSlot],
    exclude: Option<ReservationId>,
) -> Availability {
    let conflicts: Vec<BookingSlot> = slots
        .iter()
        .filter(|slot| !is_excluded(slot, exclude))
        .filter(|slot| slot.window.overlaps(window))
        .copied()
        .collect();

    Availability {
        available: conflicts.is_empty(),
        conflicts,
    }
}

fn is_excluded(slot: &BookingSlot, exclude: Option<ReservationId>) -> bool {
    matches!(exclude, Some(id) if slot.kind == BookingKind::Reservation && slot.id == id.value())
}
