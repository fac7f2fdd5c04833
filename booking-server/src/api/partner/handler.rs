//! Partner decision handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Reservation, ReservationStatus};

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    /// Target status: "allowed" or "rejected"
    pub status: String,
}

/// GET /api/partner/reservations - pending requests across the partner's
/// venues, oldest first
pub async fn list_pending(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<Reservation>>> {
    let reservations = state.manager().list_pending_for_partner(user.id)?;
    Ok(ApiResponse::success(reservations))
}

/// POST /api/partner/reservations/:id/status - decide a pending reservation
pub async fn change_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<StatusChangeRequest>,
) -> AppResult<ApiResponse<Reservation>> {
    let target = req
        .status
        .parse::<ReservationStatus>()
        .map_err(|_| AppError::validation(format!("Unknown status: {}", req.status)))?;

    let reservation = state.manager().change_status(user.id, id, target)?;
    Ok(ApiResponse::success(reservation))
}
