//! Kiosk routes
//!
//! - `POST /api/kiosk/check-in` - on-site check-in at a venue
//!
//! The kiosk device authenticates with a partner token for its venue.

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::require_partner;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/kiosk/check-in", post(handler::check_in))
        .layer(middleware::from_fn(require_partner))
}
