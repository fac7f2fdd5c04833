//! Reservation handlers (requester side)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::Reservation;

#[derive(Debug, Deserialize, Validate)]
pub struct ReservationCreateRequest {
    pub venue_id: i64,
    /// Unix timestamp in milliseconds
    pub visit_time: i64,
    #[validate(range(min = 1, message = "At least one slot unit must be requested"))]
    pub slot_units: u32,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// POST /api/reservations - request a reservation (stays pending until the
/// venue's partner decides)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ReservationCreateRequest>,
) -> AppResult<ApiResponse<Reservation>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let reservation =
        state
            .manager()
            .request_reservation(user.id, req.venue_id, req.visit_time, req.slot_units)?;
    Ok(ApiResponse::success(reservation))
}

/// GET /api/reservations - own reservations, creation order, optional
/// `?status=` filter
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<Reservation>>> {
    let reservations = state
        .manager()
        .list_reservations(user.id, query.status.as_deref())?;
    Ok(ApiResponse::success(reservations))
}

/// GET /api/reservations/:id - single reservation (owner only)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Reservation>> {
    let reservation = state.manager().get_reservation(user.id, id)?;
    Ok(ApiResponse::success(reservation))
}

/// POST /api/reservations/:id/cancel - cancel an approved reservation while
/// the notice window is open
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Reservation>> {
    let reservation = state.manager().cancel_reservation(user.id, id)?;
    Ok(ApiResponse::success(reservation))
}
