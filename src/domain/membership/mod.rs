//! Membership domain module.
//!
//! Handles membership plans, the purchase/renewal lifecycle and the date
//! arithmetic behind each period.
//!
//! # Module Structure
//!
//! - `duration` - Plan durations and end date calculation
//! - `membership_type` - Catalog entries and quotes
//! - `status` - Derived Active/Expiring/Expired status
//! - `aggregate` - Purchased memberships and their members
//! - `errors` - Membership error taxonomy

mod aggregate;
mod duration;
mod errors;
mod membership_type;
mod status;

pub use aggregate::{ActiveMembership, Member, NewMembership};
pub use duration::{calculate_end_date, DurationUnit, MembershipDuration};
pub use errors::MembershipError;
pub use membership_type::{MembershipQuote, MembershipType};
pub use status::{MembershipStatus, EXPIRING_WINDOW_DAYS};
