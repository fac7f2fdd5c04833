//! Review routes
//!
//! - `POST /api/reviews` - review a checked-in reservation
//! - `PUT /api/reviews/{id}` / `DELETE /api/reviews/{id}` - own review
//! - `DELETE /api/admin/reviews/{id}` - administrative removal
//! - `GET /api/venues/{id}/reviews` - venue's reviews

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/api/reviews", post(handler::create))
        .route(
            "/api/reviews/{id}",
            put(handler::update).delete(handler::delete),
        )
        .route("/api/venues/{id}/reviews", get(handler::list_for_venue));

    let admin_routes = Router::new()
        .route("/api/admin/reviews/{id}", delete(handler::delete_admin))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(admin_routes)
}
