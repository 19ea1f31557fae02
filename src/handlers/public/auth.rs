use axum::{
    extract::{rejection::FormRejection, State},
    Form,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, DbConn};
use crate::services::user_service;

/// OAuth2 password-flow form; `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /token - Authenticate and receive a bearer token
///
/// Expected Input (`application/x-www-form-urlencoded`):
/// `username=<email>&password=<password>`
///
/// Expected Output:
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiI...", "token_type": "bearer" }
/// ```
///
/// Unknown email and wrong password both answer 401.
pub async fn login_for_access_token(
    State(state): State<AppState>,
    mut conn: DbConn,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<TokenResponse> {
    let Form(form) = form?;

    let user = user_service::authenticate(&mut conn, &form.username, &form.password).await?;
    let access_token = state.tokens.issue(&user.email).map_err(|e| {
        tracing::error!("Failed to issue token for user {}: {}", user.id, e);
        ApiError::internal_server_error("Could not issue access token")
    })?;

    tracing::info!(
        "Issued access token for user {} (valid {} minutes)",
        user.id,
        state.tokens.ttl().num_minutes()
    );
    Ok(ApiResponse::success(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
