//! Access control: QR scans at the entrance and the log they leave.

mod errors;
mod log;
mod validator;

pub use errors::AccessError;
pub use log::{
    AccessLogEntry, AccessLogFilter, AccessLogPage, AccessResult, DEFAULT_PER_PAGE, MAX_PER_PAGE,
};
pub use validator::{evaluate, MembershipCard, ScanOutcome};
