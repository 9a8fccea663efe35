//! Membership handlers.
//!
//! ## Commands
//! - Creating, renewing and deleting memberships
//! - Re-applying a discount
//!
//! ## Queries
//! - Period and price preview
//! - Get / list memberships with derived status

mod apply_discount;
mod calculate_details;
mod create_membership;
mod delete_membership;
mod get_membership;
mod qr;
mod renew_membership;

// Commands
pub use apply_discount::{ApplyDiscountCommand, ApplyDiscountHandler};
pub use create_membership::{CreateMembershipCommand, CreateMembershipHandler};
pub use delete_membership::{DeleteMembershipCommand, DeleteMembershipHandler};
pub use renew_membership::{RenewMembershipCommand, RenewMembershipHandler};

// Queries
pub use calculate_details::{CalculateDetailsHandler, CalculateDetailsQuery, CalculateDetailsResult};
pub use get_membership::{
    GetMembershipHandler, GetMembershipQuery, ListMembershipsHandler, MembershipView,
};
