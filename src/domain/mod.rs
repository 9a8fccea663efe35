//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, rules, errors)
//! - `pricing` - Discounted prices and amounts in words
//! - `membership` - Plans, periods and the membership lifecycle
//! - `rooms` - Rooms, reservations, rentals and availability
//! - `access` - QR scan decisions and the access log

pub mod access;
pub mod foundation;
pub mod membership;
pub mod pricing;
pub mod rooms;
