//! HTTP adapter for membership endpoints.
//!
//! - `POST /memberships/api/calculate-details` - Period and price preview
//! - `GET|POST /memberships/api` - List / purchase
//! - `GET|DELETE /memberships/api/:id` - Detail / admin removal
//! - `POST /memberships/api/:id/renew` - Renew
//! - `POST /memberships/api/:id/discount` - Re-apply a discount

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::MembershipAppState;
pub use routes::{membership_router, membership_routes};
