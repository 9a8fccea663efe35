//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `MembershipRepository` - Memberships, members and the plan catalog
//! - `BookingRepository` - Rooms, reservations and rentals
//! - `AccessLogRepository` - Append-only scan log
//!
//! ## Collaborator Ports
//!
//! - `ReceiptGenerator` - Receipt and QR files
//! - `Notifier` - E-mail / WhatsApp delivery

mod access_log_repository;
mod booking_repository;
mod membership_repository;
mod notifier;
mod receipt_generator;

pub use access_log_repository::AccessLogRepository;
pub use booking_repository::BookingRepository;
pub use membership_repository::MembershipRepository;
pub use notifier::{Notification, Notifier};
pub use receipt_generator::{ReceiptData, ReceiptGenerator, ReceiptKind};
