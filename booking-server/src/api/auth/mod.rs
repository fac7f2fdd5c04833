//! Authentication routes
//!
//! - `/api/auth/register`, `/api/auth/login`: public
//! - `/api/auth/me`: requires authentication (global `require_auth` middleware)

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me))
}
