//! Shared test data for handler tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

use crate::adapters::memory::{InMemoryBookingStore, InMemoryMembershipStore};
use crate::domain::foundation::{
    ClientId, ContactInfo, Discount, DomainError, MembershipId, MembershipTypeId, Money,
    RentalId, ReservationId, RoomId, Timestamp,
};
use crate::domain::membership::{ActiveMembership, MembershipDuration, MembershipType};
use crate::domain::rooms::{
    BookingSlot, NewRental, NewReservation, Rental, Reservation, Room, RoomStatus, StayWindow,
};
use crate::ports::BookingRepository;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn individual_type() -> MembershipType {
    MembershipType {
        id: MembershipTypeId::new(1),
        name: "Individual".to_string(),
        duration: MembershipDuration::months(1).unwrap(),
        max_members: 1,
        base_price: Money::from_pesos(500).unwrap(),
    }
}

pub fn family_type() -> MembershipType {
    MembershipType {
        id: MembershipTypeId::new(2),
        name: "Familiar".to_string(),
        duration: MembershipDuration::years(1).unwrap(),
        max_members: 3,
        base_price: Money::from_pesos(4000).unwrap(),
    }
}

pub async fn membership_store() -> InMemoryMembershipStore {
    let store = InMemoryMembershipStore::new();
    store.insert_type(individual_type()).await;
    store.insert_type(family_type()).await;
    store
}

pub fn stored_membership(id: i64, end_date: NaiveDate) -> ActiveMembership {
    ActiveMembership {
        id: MembershipId::new(id),
        client_id: ClientId::new(1),
        holder_name: "Carlos Ruiz".to_string(),
        membership_type_id: MembershipTypeId::new(1),
        type_name: "Individual".to_string(),
        start_date: date(2024, 1, 1),
        end_date,
        discount: Discount::ZERO,
        final_price: Money::from_pesos(500).unwrap(),
        qr_path: None,
        members: vec![],
        created_at: Timestamp::now(),
        updated_at: Timestamp::now(),
    }
}

pub fn room(id: i64, status: RoomStatus) -> Room {
    Room {
        id: RoomId::new(id),
        number: format!("{}", 100 + id),
        room_type: "Doble".to_string(),
        price_per_night: Money::from_pesos(850).unwrap(),
        status,
    }
}

pub async fn booking_store() -> InMemoryBookingStore {
    let store = InMemoryBookingStore::new();
    store.insert_room(room(1, RoomStatus::Available)).await;
    store.insert_room(room(2, RoomStatus::Available)).await;
    store
}

pub fn contact() -> ContactInfo {
    ContactInfo::new("Ana López", "55 1234 5678", Some("ana@example.com")).unwrap()
}

pub fn window(check_in: &str, check_out: &str) -> StayWindow {
    StayWindow::parse(Some(check_in), Some(check_out)).unwrap()
}

/// Booking store that pauses after every overlap read, so two requests
/// both pass the availability check before either writes.
pub struct SlowBookingStore(pub InMemoryBookingStore);

#[async_trait]
impl BookingRepository for SlowBookingStore {
    async fn find_room(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        self.0.find_room(id).await
    }

    async fn set_room_status(&self, id: &RoomId, status: RoomStatus) -> Result<(), DomainError> {
        self.0.set_room_status(id, status).await
    }

    async fn find_overlapping_bookings(
        &self,
        room_id: &RoomId,
        window: &StayWindow,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<BookingSlot>, DomainError> {
        let slots = self.0.find_overlapping_bookings(room_id, window, exclude).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        slots
    }

    async fn save_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, DomainError> {
        self.0.save_reservation(reservation).await
    }

    async fn find_reservation(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, DomainError> {
        self.0.find_reservation(id).await
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError> {
        self.0.update_reservation(reservation).await
    }

    async fn save_rental(&self, rental: &NewRental) -> Result<Rental, DomainError> {
        self.0.save_rental(rental).await
    }

    async fn find_rental(&self, id: &RentalId) -> Result<Option<Rental>, DomainError> {
        self.0.find_rental(id).await
    }

    async fn update_rental(&self, rental: &Rental) -> Result<(), DomainError> {
        self.0.update_rental(rental).await
    }
}
