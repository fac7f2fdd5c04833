//! Kiosk check-in handler

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::reservations::ManagerError;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::Reservation;

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub venue_id: i64,
    /// Check in by reservation id...
    pub reservation_id: Option<i64>,
    /// ...or by the requester's email for guests without the id at hand
    pub email: Option<String>,
}

/// POST /api/kiosk/check-in - confirm an approved reservation at the venue
pub async fn check_in(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CheckInRequest>,
) -> AppResult<ApiResponse<Reservation>> {
    // The kiosk token must belong to the venue's partner
    let venue = state.manager().get_venue(req.venue_id)?;
    if venue.partner_id != user.id && !user.is_admin() {
        return Err(ManagerError::AccessDenied.into());
    }

    let reservation = match (req.reservation_id, req.email.as_deref()) {
        (Some(reservation_id), _) => state.manager().check_in(req.venue_id, reservation_id)?,
        (None, Some(email)) => state.manager().check_in_by_email(req.venue_id, email)?,
        (None, None) => {
            return Err(AppError::validation(
                "Either reservation_id or email is required",
            ));
        }
    };
    Ok(ApiResponse::success(reservation))
}
