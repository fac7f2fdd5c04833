//! Review handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::Review;

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewCreateRequest {
    pub reservation_id: i64,
    #[validate(range(max = 5, message = "Rating must be between 0 and 5"))]
    pub rating: u8,
    #[validate(length(min = 1, max = 1000, message = "Content must be 1-1000 characters"))]
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewUpdateRequest {
    #[validate(range(max = 5, message = "Rating must be between 0 and 5"))]
    pub rating: u8,
    #[validate(length(min = 1, max = 1000, message = "Content must be 1-1000 characters"))]
    #[serde(default)]
    pub content: String,
}

/// POST /api/reviews - review a checked-in reservation
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ReviewCreateRequest>,
) -> AppResult<ApiResponse<Review>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let review = state
        .manager()
        .add_review(user.id, req.reservation_id, req.rating, req.content)?;
    Ok(ApiResponse::success(review))
}

/// PUT /api/reviews/:id - update own review
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<ReviewUpdateRequest>,
) -> AppResult<ApiResponse<Review>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let review = state
        .manager()
        .update_review(user.id, id, req.rating, req.content)?;
    Ok(ApiResponse::success(review))
}

/// DELETE /api/reviews/:id - delete own review
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.manager().delete_review(user.id, id)?;
    Ok(ApiResponse::ok())
}

/// DELETE /api/admin/reviews/:id - administrative removal
pub async fn delete_admin(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.manager().delete_review_admin(id)?;
    Ok(ApiResponse::ok())
}

/// GET /api/venues/:id/reviews - a venue's reviews, oldest first
pub async fn list_for_venue(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Vec<Review>>> {
    let reviews = state.manager().list_reviews_for_venue(id)?;
    Ok(ApiResponse::success(reviews))
}
