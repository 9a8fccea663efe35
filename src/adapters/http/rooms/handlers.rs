//! HTTP handlers for room, reservation and rental endpoints.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::rooms::{
    CancelReservationCommand, CancelReservationHandler, CheckAvailabilityHandler,
    CheckAvailabilityQuery, CreateRentalCommand, CreateRentalHandler, CreateReservationCommand,
    CreateReservationHandler, FinishRentalCommand, FinishRentalHandler, MarkRoomAvailableCommand,
    MarkRoomAvailableHandler,
};
use crate::domain::foundation::{RentalId, ReservationId, RoomId};
use crate::ports::{BookingRepository, Notifier, ReceiptGenerator};

use super::super::error::ApiError;
use super::dto::{
    AvailabilityParams, AvailabilityResponse, CreateRentalRequest, CreateReservationRequest,
    RentalResponse, ReservationResponse, RoomResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RoomsAppState {
    pub booking_repository: Arc<dyn BookingRepository>,
    pub receipt_generator: Arc<dyn ReceiptGenerator>,
    pub notifier: Arc<dyn Notifier>,
}

impl RoomsAppState {
    pub fn check_availability_handler(&self) -> CheckAvailabilityHandler {
        CheckAvailabilityHandler::new(self.booking_repository.clone())
    }

    pub fn create_reservation_handler(&self) -> CreateReservationHandler {
        CreateReservationHandler::new(
            self.booking_repository.clone(),
            self.receipt_generator.clone(),
            self.notifier.clone(),
        )
    }

    pub fn cancel_reservation_handler(&self) -> CancelReservationHandler {
        CancelReservationHandler::new(self.booking_repository.clone())
    }

    pub fn create_rental_handler(&self) -> CreateRentalHandler {
        CreateRentalHandler::new(
            self.booking_repository.clone(),
            self.receipt_generator.clone(),
            self.notifier.clone(),
        )
    }

    pub fn finish_rental_handler(&self) -> FinishRentalHandler {
        FinishRentalHandler::new(self.booking_repository.clone())
    }

    pub fn mark_room_available_handler(&self) -> MarkRoomAvailableHandler {
        MarkRoomAvailableHandler::new(self.booking_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/rooms/:id/availability?check_in&check_out&exclude_reservation_id
pub async fn check_availability(
    State(state): State<RoomsAppState>,
    Path(id): Path<String>,
    params: Result<Query<AvailabilityParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let query = CheckAvailabilityQuery {
        room_id: id.parse::<RoomId>()?,
        window: params.window()?,
        exclude_reservation_id: params.exclude()?,
    };

    let availability = state.check_availability_handler().handle(query).await?;
    Ok(Json(AvailabilityResponse::from(availability)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<RoomsAppState>,
    payload: Result<Json<CreateReservationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = CreateReservationCommand {
        room_id: request.id_habitacion,
        client: request.client.contact()?,
        window: request.client.window()?,
        deposit: request.anticipo,
    };

    let reservation = state.create_reservation_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

/// POST /api/reservations/:id/cancel
pub async fn cancel_reservation(
    State(state): State<RoomsAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CancelReservationCommand {
        reservation_id: id.parse::<ReservationId>()?,
    };
    let reservation = state.cancel_reservation_handler().handle(cmd).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// POST /api/rentals - Walk-in or from a reservation
pub async fn create_rental(
    State(state): State<RoomsAppState>,
    payload: Result<Json<CreateRentalRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = CreateRentalCommand {
        room_id: request.id_habitacion,
        client: request.client.contact()?,
        window: request.client.window()?,
        payment_type: request.payment_type()?,
        amount: request.monto,
        reservation_id: request.id_reservacion,
    };

    let rental = state.create_rental_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(RentalResponse::from(rental))))
}

/// POST /api/rentals/:id/finish - Guest checked out
pub async fn finish_rental(
    State(state): State<RoomsAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = FinishRentalCommand {
        rental_id: id.parse::<RentalId>()?,
    };
    let rental = state.finish_rental_handler().handle(cmd).await?;
    Ok(Json(RentalResponse::from(rental)))
}

/// POST /api/rooms/:id/available - Housekeeping done
pub async fn mark_room_available(
    State(state): State<RoomsAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = MarkRoomAvailableCommand {
        room_id: id.parse::<RoomId>()?,
    };
    let room = state.mark_room_available_handler().handle(cmd).await?;
    Ok(Json(RoomResponse::from(room)))
}
