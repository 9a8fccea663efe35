//! PostgreSQL implementation of BookingRepository.
//!
//! Booking writes lock the room row, re-run the overlap query and insert in
//! one transaction. The exclusion constraints in `migrations/` back this up;
//! their violation (SQLSTATE 23P01) is reported as `RoomUnavailable`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::domain::foundation::{
    ContactInfo, DomainError, ErrorCode, RentalId, ReservationId, RoomId, Timestamp,
};
use crate::domain::rooms::{
    BookingError, BookingKind, BookingSlot, NewRental, NewReservation, PaymentType, Rental,
    RentalStatus, Reservation, ReservationStatus, Room, RoomStatus, StayWindow,
};
use crate::ports::BookingRepository;

use super::{corrupt_row, database_error, money_from_db};

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a transaction holding the room row lock, so bookings for the
    /// same room are written one at a time.
    async fn lock_room(&self, room_id: &RoomId) -> Result<Transaction<'_, Postgres>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to start transaction"))?;

        let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(room_id.value())
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error("Failed to lock room"))?;
        if locked.is_none() {
            return Err(BookingError::RoomNotFound(*room_id).into());
        }
        Ok(tx)
    }
}

/// SQLSTATE for `exclusion_violation`.
const EXCLUSION_VIOLATION: &str = "23P01";

/// Like `database_error`, except that an overlap caught by the exclusion
/// constraint means another request booked the room first.
fn booking_write_error(
    context: &'static str,
    room_id: RoomId,
) -> impl Fn(sqlx::Error) -> DomainError {
    move |err| match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(EXCLUSION_VIOLATION) => {
            tracing::info!(room_id = %room_id, "booking refused by overlap constraint");
            BookingError::RoomUnavailable(room_id).into()
        }
        _ => database_error(context)(err),
    }
}

async fn overlapping<'e>(
    executor: impl PgExecutor<'e>,
    room_id: &RoomId,
    window: &StayWindow,
    exclude: Option<ReservationId>,
) -> Result<Vec<BookingSlot>, DomainError> {
    let rows: Vec<SlotRow> = sqlx::query_as(
        r#"
        SELECT 'reservation' AS kind, id, check_in, check_out
        FROM reservations
        WHERE room_id = $1
          AND status = 'active'
          AND check_in < $3
          AND check_out > $2
          AND ($4::BIGINT IS NULL OR id <> $4)
        UNION ALL
        SELECT 'rental' AS kind, id, check_in, check_out
        FROM rentals
        WHERE room_id = $1
          AND status = 'active'
          AND check_in < $3
          AND check_out > $2
        "#,
    )
    .bind(room_id.value())
    .bind(window.check_in().as_datetime())
    .bind(window.check_out().as_datetime())
    .bind(exclude.map(|id| id.value()))
    .fetch_all(executor)
    .await
    .map_err(database_error("Failed to query overlapping bookings"))?;

    rows.into_iter().map(BookingSlot::try_from).collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Rows
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
struct RoomRow {
    id: i64,
    number: String,
    room_type: String,
    price_per_night_cents: i64,
    status: String,
}

impl TryFrom<RoomRow> for Room {
    type Error = DomainError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Room {
            id: RoomId::new(row.id),
            number: row.number,
            room_type: row.room_type,
            price_per_night: money_from_db("room price", row.price_per_night_cents)?,
            status: RoomStatus::from_db(&row.status)
                .ok_or_else(|| corrupt_row("room status", &row.status))?,
        })
    }
}

/// Contact columns are stored already normalized; rows are rebuilt as-is.
fn contact(name: String, phone: String, email: Option<String>) -> ContactInfo {
    ContactInfo { name, phone, email }
}

fn window(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<StayWindow, DomainError> {
    StayWindow::new(Timestamp::from_datetime(check_in), Timestamp::from_datetime(check_out))
        .map_err(|e| corrupt_row("booking window", e))
}

#[derive(Debug, sqlx::FromRow)]
struct ReservationRow {
    id: i64,
    room_id: i64,
    client_name: String,
    client_phone: String,
    client_email: Option<String>,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    deposit_cents: i64,
    receipt_path: Option<String>,
    qr_path: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = DomainError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        Ok(Reservation {
            id: ReservationId::new(row.id),
            room_id: RoomId::new(row.room_id),
            client: contact(row.client_name, row.client_phone, row.client_email),
            window: window(row.check_in, row.check_out)?,
            deposit: money_from_db("deposit", row.deposit_cents)?,
            receipt_path: row.receipt_path,
            qr_path: row.qr_path,
            status: ReservationStatus::from_db(&row.status)
                .ok_or_else(|| corrupt_row("reservation status", &row.status))?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RentalRow {
    id: i64,
    room_id: i64,
    reservation_id: Option<i64>,
    client_name: String,
    client_phone: String,
    client_email: Option<String>,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    payment_type: String,
    amount_cents: i64,
    receipt_path: Option<String>,
    qr_path: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RentalRow> for Rental {
    type Error = DomainError;

    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        Ok(Rental {
            id: RentalId::new(row.id),
            room_id: RoomId::new(row.room_id),
            reservation_id: row.reservation_id.map(ReservationId::new),
            client: contact(row.client_name, row.client_phone, row.client_email),
            window: window(row.check_in, row.check_out)?,
            payment_type: row
                .payment_type
                .parse::<PaymentType>()
                .map_err(|e| corrupt_row("payment type", e))?,
            amount: money_from_db("rental amount", row.amount_cents)?,
            receipt_path: row.receipt_path,
            qr_path: row.qr_path,
            status: RentalStatus::from_db(&row.status)
                .ok_or_else(|| corrupt_row("rental status", &row.status))?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SlotRow {
    kind: String,
    id: i64,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

impl TryFrom<SlotRow> for BookingSlot {
    type Error = DomainError;

    fn try_from(row: SlotRow) -> Result<Self, Self::Error> {
        let kind = match row.kind.as_str() {
            "reservation" => BookingKind::Reservation,
            "rental" => BookingKind::Rental,
            other => return Err(corrupt_row("booking kind", other)),
        };
        Ok(BookingSlot {
            kind,
            id: row.id,
            window: window(row.check_in, row.check_out)?,
        })
    }
}

const RESERVATION_COLUMNS: &str = "id, room_id, client_name, client_phone, client_email, \
     check_in, check_out, deposit_cents, receipt_path, qr_path, status, created_at";

const RENTAL_COLUMNS: &str = "id, room_id, reservation_id, client_name, client_phone, \
     client_email, check_in, check_out, payment_type, amount_cents, receipt_path, qr_path, \
     status, created_at";

// ════════════════════════════════════════════════════════════════════════════════
// Repository
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_room(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        let row: Option<RoomRow> = sqlx::query_as(
            "SELECT id, number, room_type, price_per_night_cents, status FROM rooms WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to fetch room"))?;

        row.map(Room::try_from).transpose()
    }

    async fn set_room_status(&self, id: &RoomId, status: RoomStatus) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE rooms SET status = $2 WHERE id = $1")
            .bind(id.value())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error("Failed to update room status"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RoomNotFound,
                format!("Room {} not found", id),
            ));
        }
        Ok(())
    }

    async fn find_overlapping_bookings(
        &self,
        room_id: &RoomId,
        window: &StayWindow,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<BookingSlot>, DomainError> {
        overlapping(&self.pool, room_id, window, exclude).await
    }

    async fn save_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, DomainError> {
        let room_id = reservation.room_id;
        let mut tx = self.lock_room(&room_id).await?;
        if !overlapping(&mut *tx, &room_id, &reservation.window, None).await?.is_empty() {
            return Err(BookingError::RoomUnavailable(room_id).into());
        }

        let row: ReservationRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO reservations (
                room_id, client_name, client_phone, client_email, check_in, check_out, deposit_cents
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            RESERVATION_COLUMNS
        ))
        .bind(reservation.room_id.value())
        .bind(&reservation.client.name)
        .bind(&reservation.client.phone)
        .bind(&reservation.client.email)
        .bind(reservation.window.check_in().as_datetime())
        .bind(reservation.window.check_out().as_datetime())
        .bind(reservation.deposit.cents())
        .fetch_one(&mut *tx)
        .await
        .map_err(booking_write_error("Failed to save reservation", room_id))?;

        tx.commit()
            .await
            .map_err(booking_write_error("Failed to commit reservation", room_id))?;
        Reservation::try_from(row)
    }

    async fn find_reservation(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, DomainError> {
        let row: Option<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reservations WHERE id = $1",
            RESERVATION_COLUMNS
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to fetch reservation"))?;

        row.map(Reservation::try_from).transpose()
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE reservations SET status = $2, receipt_path = $3, qr_path = $4 WHERE id = $1",
        )
        .bind(reservation.id.value())
        .bind(reservation.status.as_str())
        .bind(&reservation.receipt_path)
        .bind(&reservation.qr_path)
        .execute(&self.pool)
        .await
        .map_err(database_error("Failed to update reservation"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReservationNotFound,
                format!("Reservation {} not found", reservation.id),
            ));
        }
        Ok(())
    }

    async fn save_rental(&self, rental: &NewRental) -> Result<Rental, DomainError> {
        let room_id = rental.room_id;
        let mut tx = self.lock_room(&room_id).await?;
        let others = overlapping(&mut *tx, &room_id, &rental.window, rental.reservation_id).await?;
        if !others.is_empty() {
            return Err(BookingError::RoomUnavailable(room_id).into());
        }

        let row: RentalRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO rentals (
                room_id, reservation_id, client_name, client_phone, client_email,
                check_in, check_out, payment_type, amount_cents
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            RENTAL_COLUMNS
        ))
        .bind(rental.room_id.value())
        .bind(rental.reservation_id.map(|id| id.value()))
        .bind(&rental.client.name)
        .bind(&rental.client.phone)
        .bind(&rental.client.email)
        .bind(rental.window.check_in().as_datetime())
        .bind(rental.window.check_out().as_datetime())
        .bind(rental.payment_type.as_str())
        .bind(rental.amount.cents())
        .fetch_one(&mut *tx)
        .await
        .map_err(booking_write_error("Failed to save rental", room_id))?;

        if let Some(source) = rental.reservation_id {
            let converted = sqlx::query(
                "UPDATE reservations SET status = 'converted' WHERE id = $1 AND status = 'active'",
            )
            .bind(source.value())
            .execute(&mut *tx)
            .await
            .map_err(database_error("Failed to convert reservation"))?;
            if converted.rows_affected() == 0 {
                return Err(
                    BookingError::invalid_state("reservation", "no longer active", "convert")
                        .into(),
                );
            }
        }

        sqlx::query("UPDATE rooms SET status = 'occupied' WHERE id = $1")
            .bind(room_id.value())
            .execute(&mut *tx)
            .await
            .map_err(database_error("Failed to occupy room"))?;

        tx.commit()
            .await
            .map_err(booking_write_error("Failed to commit rental", room_id))?;
        Rental::try_from(row)
    }

    async fn find_rental(&self, id: &RentalId) -> Result<Option<Rental>, DomainError> {
        let row: Option<RentalRow> = sqlx::query_as(&format!(
            "SELECT {} FROM rentals WHERE id = $1",
            RENTAL_COLUMNS
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to fetch rental"))?;

        row.map(Rental::try_from).transpose()
    }

    async fn update_rental(&self, rental: &Rental) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE rentals SET status = $2, receipt_path = $3, qr_path = $4 WHERE id = $1",
        )
        .bind(rental.id.value())
        .bind(rental.status.as_str())
        .bind(&rental.receipt_path)
        .bind(&rental.qr_path)
        .execute(&self.pool)
        .await
        .map_err(database_error("Failed to update rental"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RentalNotFound,
                format!("Rental {} not found", rental.id),
            ));
        }
        Ok(())
    }
}
