//! Venue handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Venue, VenueCreate};

#[derive(Debug, Deserialize, Validate)]
pub struct VenueCreateRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "Address must be 1-200 characters"))]
    pub address: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Venue needs at least one slot unit"))]
    pub total_slot_units: u32,
}

/// POST /api/venues - create a venue owned by the calling partner
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<VenueCreateRequest>,
) -> AppResult<ApiResponse<Venue>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let venue = state.manager().create_venue(
        user.id,
        VenueCreate {
            name: req.name,
            address: req.address,
            description: req.description.unwrap_or_default(),
            total_slot_units: req.total_slot_units,
        },
    )?;
    Ok(ApiResponse::success(venue))
}

/// GET /api/venues - venues owned by the calling partner
pub async fn list_owned(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<Venue>>> {
    let venues = state.manager().list_venues(user.id)?;
    Ok(ApiResponse::success(venues))
}

/// GET /api/venues/:id - venue details with live availability
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Venue>> {
    let venue = state.manager().get_venue(id)?;
    Ok(ApiResponse::success(venue))
}
