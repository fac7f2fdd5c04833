//! Partner routes
//!
//! - `GET /api/partner/reservations` - pending reservations across owned venues
//! - `POST /api/partner/reservations/{id}/status` - approve or reject

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_partner;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/partner/reservations", get(handler::list_pending))
        .route(
            "/api/partner/reservations/{id}/status",
            post(handler::change_status),
        )
        .layer(middleware::from_fn(require_partner))
}
