//! Command and query handlers, one module per area.

pub mod access;
pub mod membership;
pub mod notify;
pub mod rooms;

#[cfg(test)]
pub(crate) mod fixtures;

pub use access::*;
pub use membership::*;
pub use rooms::*;
