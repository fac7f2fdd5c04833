//! Utility module
//!
//! - [`logger`] - tracing setup and log rotation
//! - Error and response types re-exported from `shared::error`

pub mod logger;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
