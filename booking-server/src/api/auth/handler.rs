//! Authentication handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{User, UserRole};
use shared::util::{now_millis, snowflake_id};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// "user" or "partner"; admin accounts are seeded from configuration
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User view returned by the API, without the password hash
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
    pub created_at: i64,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// POST /api/auth/register - create an account
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<ApiResponse<UserInfo>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = match req.role.as_deref() {
        None | Some("user") => UserRole::User,
        Some("partner") => UserRole::Partner,
        Some(other) => {
            return Err(AppError::validation(format!("Unknown role: {}", other)));
        }
    };
    let email = req.email.trim().to_lowercase();

    let storage = state.manager().storage();
    if storage
        .get_user_by_email(&email)
        .map_err(|e| AppError::database(e.to_string()))?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::EmailExists));
    }

    let user = User {
        id: snowflake_id(),
        email,
        password_hash: password::hash_password(&req.password)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?,
        role,
        created_at: now_millis(),
    };

    let txn = storage
        .begin_write()
        .map_err(|e| AppError::database(e.to_string()))?;
    storage
        .put_user(&txn, &user)
        .map_err(|e| AppError::database(e.to_string()))?;
    txn.commit()
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(user_id = user.id, role = %user.role, "Account registered");
    Ok(ApiResponse::success(user.into()))
}

/// POST /api/auth/login - exchange credentials for a JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let email = req.email.trim().to_lowercase();

    let user = state
        .manager()
        .storage()
        .get_user_by_email(&email)
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(AppError::invalid_credentials)?;

    let password_valid = password::verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !password_valid {
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    Ok(ApiResponse::success(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/me - current principal
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<UserInfo>> {
    let user = state
        .manager()
        .storage()
        .get_user(user.id)
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(ApiResponse::success(user.into()))
}
