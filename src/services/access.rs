use sqlx::PgConnection;

use crate::auth::Claims;
use crate::database::models::{Subject, User};
use crate::database::repository;

use super::ServiceError;

const CREDENTIALS_MESSAGE: &str = "Could not validate credentials";

/// Load the user named by already-verified claims.
pub async fn resolve_principal(conn: &mut PgConnection, claims: &Claims) -> Result<User, ServiceError> {
    let user = repository::find_user_by_email(conn, &claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token subject '{}' has no matching user", claims.sub);
            ServiceError::Unauthorized(CREDENTIALS_MESSAGE.to_string())
        })?;

    if !user.is_active {
        tracing::warn!("Inactive user '{}' presented a token", user.email);
        return Err(ServiceError::Unauthorized("Inactive user".to_string()));
    }
    Ok(user)
}

/// Fetch a subject and confirm the user owns it.
///
/// A missing id is `NotFound`; an id owned by someone else is `Forbidden`.
pub async fn verify_ownership(conn: &mut PgConnection, subject_id: i64, user_id: i64) -> Result<Subject, ServiceError> {
    let subject = repository::find_subject(conn, subject_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Subject with id {} not found", subject_id)))?;

    check_owner(subject, user_id)
}

fn check_owner(subject: Subject, user_id: i64) -> Result<Subject, ServiceError> {
    if !subject.is_owned_by(user_id) {
        tracing::warn!("User {} attempted to access subject {} owned by {}", user_id, subject.id, subject.user_id);
        return Err(ServiceError::Forbidden("Not authorized to access this subject".to_string()));
    }
    Ok(subject)
}
