//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check (public)
//! - [`auth`] - registration, login, current principal
//! - [`venues`] - venue creation and lookup
//! - [`reservations`] - requester-side reservation lifecycle
//! - [`partner`] - partner decisions on pending reservations
//! - [`kiosk`] - on-site check-in
//! - [`reviews`] - review gate operations

pub mod auth;
pub mod health;
pub mod kiosk;
pub mod partner;
pub mod reservations;
pub mod reviews;
pub mod venues;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use shared::error::{ApiResponse, AppError, AppResult};

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(venues::router())
        .merge(reservations::router())
        .merge(partner::router())
        .merge(kiosk::router())
        .merge(reviews::router())
}

/// Build the fully configured application with middleware and state
pub fn create_router(state: ServerState) -> Router {
    build_router()
        // JWT middleware at router level; require_auth skips public routes
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
