//! Requester-side reservation routes
//!
//! - `POST /api/reservations` - request a reservation
//! - `GET /api/reservations` - own reservations, optional `?status=` filter
//! - `GET /api/reservations/{id}` - single reservation
//! - `POST /api/reservations/{id}/cancel` - cancel an approved reservation

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/reservations",
            post(handler::create).get(handler::list),
        )
        .route("/api/reservations/{id}", get(handler::get_by_id))
        .route("/api/reservations/{id}/cancel", post(handler::cancel))
}
