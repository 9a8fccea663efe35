//! Adapters - Implementations of port interfaces.
//!
//! - `http` - axum JSON API
//! - `postgres` - sqlx repositories
//! - `memory` - In-process repositories for tests and database-less runs
//! - `receipts` - Receipt and QR files on local disk
//! - `notifications` - Resend e-mail and WhatsApp gateways

pub mod http;
pub mod memory;
pub mod notifications;
pub mod postgres;
pub mod receipts;
