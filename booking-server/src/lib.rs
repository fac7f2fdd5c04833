//! Booking Server - venue table-slot reservation service
//!
//! # Architecture overview
//!
//! This crate is the server entry point, providing:
//!
//! - **Reservations** (`reservations`): capacity accounting, reservation
//!   state machine, time-gated policies and the review gate, persisted in
//!   embedded redb storage
//! - **Authentication** (`auth`): JWT + Argon2
//! - **HTTP API** (`api`): RESTful interface for requesters, partners,
//!   kiosks and administrators
//!
//! # Module structure
//!
//! ```text
//! booking-server/src/
//! ├── core/          # Configuration, state, server lifecycle
//! ├── auth/          # JWT authentication, role middleware
//! ├── api/           # HTTP routes and handlers
//! ├── reservations/  # Reservation lifecycle and storage
//! └── utils/         # Logging and helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod reservations;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use reservations::{BookingManager, BookingStorage};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Environment setup: dotenv plus logging
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok();

    init_logger_with_file(&level, json, log_dir.as_deref())?;
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/
    "#
    );
}
