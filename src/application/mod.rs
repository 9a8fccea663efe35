//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate domain rules over the ports. Commands write,
//! queries only read.

pub mod handlers;

pub use handlers::{
    // Membership
    ApplyDiscountCommand, ApplyDiscountHandler, CalculateDetailsHandler, CalculateDetailsQuery,
    CalculateDetailsResult, CreateMembershipCommand, CreateMembershipHandler,
    DeleteMembershipCommand, DeleteMembershipHandler, GetMembershipHandler, GetMembershipQuery,
    ListMembershipsHandler, MembershipView, RenewMembershipCommand, RenewMembershipHandler,
    // Rooms
    CancelReservationCommand, CancelReservationHandler, CheckAvailabilityHandler,
    CheckAvailabilityQuery, CreateRentalCommand, CreateRentalHandler, CreateReservationCommand,
    CreateReservationHandler, FinishRentalCommand, FinishRentalHandler, MarkRoomAvailableCommand,
    MarkRoomAvailableHandler,
    // Access
    ListAccessLogHandler, ScanMembershipCommand, ScanMembershipHandler,
};
