//! In-memory rooms, reservations and rentals.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, RentalId, ReservationId, RoomId, Timestamp,
};
use crate::domain::rooms::{
    BookingError, BookingSlot, NewRental, NewReservation, Rental, RentalStatus, Reservation,
    ReservationStatus, Room, RoomStatus, StayWindow,
};
use crate::ports::BookingRepository;

#[derive(Debug, Default)]
struct State {
    rooms: HashMap<RoomId, Room>,
    reservations: HashMap<ReservationId, Reservation>,
    rentals: HashMap<RentalId, Rental>,
    next_reservation_id: i64,
    next_rental_id: i64,
}

impl State {
    fn overlapping(
        &self,
        room_id: &RoomId,
        window: &StayWindow,
        exclude: Option<ReservationId>,
    ) -> Vec<BookingSlot> {
        let reservations = self
            .reservations
            .values()
            .filter(|r| r.room_id == *room_id && r.blocks_room() && Some(r.id) != exclude)
            .map(BookingSlot::from);
        let rentals = self
            .rentals
            .values()
            .filter(|r| r.room_id == *room_id && r.status == RentalStatus::Active)
            .map(BookingSlot::from);
        reservations
            .chain(rentals)
            .filter(|slot| slot.window.overlaps(window))
            .collect()
    }

    fn ensure_free(
        &self,
        room_id: &RoomId,
        window: &StayWindow,
        exclude: Option<ReservationId>,
    ) -> Result<(), DomainError> {
        if self.overlapping(room_id, window, exclude).is_empty() {
            Ok(())
        } else {
            Err(BookingError::RoomUnavailable(*room_id).into())
        }
    }
}

/// Bookings are checked for overlap under the same write lock that
/// inserts them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    state: Arc<RwLock<State>>,
    fail: bool,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            state: Arc::default(),
            fail: true,
        }
    }

    pub async fn insert_room(&self, room: Room) {
        self.state.write().await.rooms.insert(room.id, room);
    }

    pub async fn room(&self, id: RoomId) -> Option<Room> {
        self.state.read().await.rooms.get(&id).cloned()
    }

    pub async fn reservation(&self, id: ReservationId) -> Option<Reservation> {
        self.state.read().await.reservations.get(&id).cloned()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::database("booking store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingStore {
    async fn find_room(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        self.check()?;
        Ok(self.state.read().await.rooms.get(id).cloned())
    }

    async fn set_room_status(&self, id: &RoomId, status: RoomStatus) -> Result<(), DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        let room = state.rooms.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::RoomNotFound, format!("Room {} not found", id))
        })?;
        room.status = status;
        Ok(())
    }

    async fn find_overlapping_bookings(
        &self,
        room_id: &RoomId,
        window: &StayWindow,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<BookingSlot>, DomainError> {
        self.check()?;
        Ok(self.state.read().await.overlapping(room_id, window, exclude))
    }

    async fn save_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        state.ensure_free(&reservation.room_id, &reservation.window, None)?;
        state.next_reservation_id += 1;
        let stored = Reservation {
            id: ReservationId::new(state.next_reservation_id),
            room_id: reservation.room_id,
            client: reservation.client.clone(),
            window: reservation.window,
            deposit: reservation.deposit,
            receipt_path: None,
            qr_path: None,
            status: ReservationStatus::Active,
            created_at: Timestamp::now(),
        };
        state.reservations.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_reservation(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, DomainError> {
        self.check()?;
        Ok(self.state.read().await.reservations.get(id).cloned())
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        match state.reservations.get_mut(&reservation.id) {
            Some(existing) => {
                *existing = reservation.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ReservationNotFound,
                format!("Reservation {} not found", reservation.id),
            )),
        }
    }

    async fn save_rental(&self, rental: &NewRental) -> Result<Rental, DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        state.ensure_free(&rental.room_id, &rental.window, rental.reservation_id)?;
        if !state.rooms.contains_key(&rental.room_id) {
            return Err(BookingError::RoomNotFound(rental.room_id).into());
        }
        if let Some(id) = rental.reservation_id {
            match state.reservations.get(&id) {
                Some(source) if source.status == ReservationStatus::Active => {}
                Some(source) => {
                    return Err(BookingError::invalid_state(
                        "reservation",
                        source.status.as_str(),
                        "convert",
                    )
                    .into())
                }
                None => return Err(BookingError::ReservationNotFound(id).into()),
            }
        }

        state.next_rental_id += 1;
        let stored = Rental {
            id: RentalId::new(state.next_rental_id),
            room_id: rental.room_id,
            reservation_id: rental.reservation_id,
            client: rental.client.clone(),
            window: rental.window,
            payment_type: rental.payment_type,
            amount: rental.amount,
            receipt_path: None,
            qr_path: None,
            status: RentalStatus::Active,
            created_at: Timestamp::now(),
        };
        state.rentals.insert(stored.id, stored.clone());
        if let Some(id) = rental.reservation_id {
            if let Some(source) = state.reservations.get_mut(&id) {
                source.status = ReservationStatus::Converted;
            }
        }
        if let Some(room) = state.rooms.get_mut(&rental.room_id) {
            room.status = RoomStatus::Occupied;
        }
        Ok(stored)
    }

    async fn find_rental(&self, id: &RentalId) -> Result<Option<Rental>, DomainError> {
        self.check()?;
        Ok(self.state.read().await.rentals.get(id).cloned())
    }

    async fn update_rental(&self, rental: &Rental) -> Result<(), DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        match state.rentals.get_mut(&rental.id) {
            Some(existing) => {
                *existing = rental.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::RentalNotFound,
                format!("Rental {} not found", rental.id),
            )),
        }
    }
}
