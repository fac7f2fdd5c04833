//! Data models
//!
//! Shared between booking-server and clients (via API).
//! All IDs are `i64` snowflake values; timestamps are Unix milliseconds.

pub mod reservation;
pub mod review;
pub mod user;
pub mod venue;

// Re-exports
pub use reservation::*;
pub use review::*;
pub use user::*;
pub use venue::*;
