//! Venue routes
//!
//! - `POST /api/venues` (partner) - create a venue
//! - `GET /api/venues` (partner) - list owned venues
//! - `GET /api/venues/{id}` - venue details

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_partner;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let partner_routes = Router::new()
        .route(
            "/api/venues",
            post(handler::create).get(handler::list_owned),
        )
        .layer(middleware::from_fn(require_partner));

    let read_routes = Router::new().route("/api/venues/{id}", get(handler::get_by_id));

    partner_routes.merge(read_routes)
}
