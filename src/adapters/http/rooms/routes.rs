//! Axum router configuration for room endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_reservation, check_availability, create_rental, create_reservation, finish_rental,
    mark_room_available, RoomsAppState,
};

/// Room, reservation and rental routes.
pub fn rooms_routes() -> Router<RoomsAppState> {
    Router::new()
        .route("/api/rooms/:id/availability", get(check_availability))
        .route("/api/rooms/:id/available", post(mark_room_available))
        .route("/api/reservations", post(create_reservation))
        .route("/api/reservations/:id/cancel", post(cancel_reservation))
        .route("/api/rentals", post(create_rental))
        .route("/api/rentals/:id/finish", post(finish_rental))
}

pub fn rooms_router(state: RoomsAppState) -> Router {
    rooms_routes().with_state(state)
}
