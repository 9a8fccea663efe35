//! Access handlers.
//!
//! - Scan a membership QR code at the entrance (command, appends to the log)
//! - List the access log (query)

mod list_access_log;
mod scan_membership;

pub use list_access_log::ListAccessLogHandler;
pub use scan_membership::{ScanMembershipCommand, ScanMembershipHandler};
