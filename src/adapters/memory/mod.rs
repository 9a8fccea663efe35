//! In-memory adapters for tests and database-less local runs.

mod access_log_store;
mod booking_store;
mod membership_store;
mod notifier;

pub use access_log_store::InMemoryAccessLog;
pub use booking_store::InMemoryBookingStore;
pub use membership_store::InMemoryMembershipStore;
pub use notifier::RecordingNotifier;
