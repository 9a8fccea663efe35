//! HTTP adapter for rooms, reservations and rentals.
//!
//! - `GET /api/rooms/:id/availability` - Is the room free for a window
//! - `POST /api/rooms/:id/available` - Housekeeping done
//! - `POST /api/reservations`, `POST /api/reservations/:id/cancel`
//! - `POST /api/rentals`, `POST /api/rentals/:id/finish`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::RoomsAppState;
pub use routes::{rooms_router, rooms_routes};
