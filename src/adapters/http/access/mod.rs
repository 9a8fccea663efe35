//! HTTP adapter for the entrance scanner.
//!
//! - `GET /api/memberships/by-qr/:id` - Scan, returns `{success, data}`
//! - `GET /api/access-log` - Paginated log, optional `date` filter

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AccessAppState;
pub use routes::{access_router, access_routes};
