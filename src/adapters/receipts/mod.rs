//! Receipt and QR file generation.

mod local;

pub use local::LocalReceiptGenerator;
