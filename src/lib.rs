//! Recepción - Hotel and membership club back office
//!
//! Membership periods and pricing, room availability with reservations and
//! rentals, and QR-based entrance control with an append-only access log.
//! Exposed as a JSON API over PostgreSQL.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
