use crate::database::models::UserProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, DbConn};
use crate::services::user_service;

/// GET /users/me - The authenticated user with its subjects and their definitions
pub async fn read_me(AuthUser(user): AuthUser, mut conn: DbConn) -> ApiResult<UserProfile> {
    let profile = user_service::profile(&mut conn, user).await?;
    Ok(ApiResponse::success(profile))
}
