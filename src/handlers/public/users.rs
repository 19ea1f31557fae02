use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::UserProfile;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, DbConn};
use crate::services::user_service;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// POST /users/ - Register new user account
///
/// Expected Input:
/// ```json
/// { "email": "coach@example.com", "password": "secret" }
/// ```
///
/// Answers 400 when the email is already registered and 403 when registration is
/// turned off by configuration.
pub async fn register(
    State(state): State<AppState>,
    mut conn: DbConn,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<UserProfile> {
    if !state.config.security.allow_registration {
        return Err(ApiError::forbidden("User registration is disabled"));
    }
    let Json(payload) = payload?;

    let user = user_service::create_user(&mut conn, &payload.email, &payload.password).await?;
    Ok(ApiResponse::created(UserProfile { user, subjects: Vec::new() }))
}
