use sqlx::PgConnection;

use crate::auth::{hash_password, verify_password};
use crate::database::models::{SubjectWithDefinitions, User, UserProfile};
use crate::database::repository::{self, Page};

use super::{conflict_on_unique, ServiceError};

/// Register a new account. The password is hashed before it reaches the database.
pub async fn create_user(conn: &mut PgConnection, email: &str, password: &str) -> Result<User, ServiceError> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(ServiceError::invalid_field("password", "password must not be empty"));
    }

    if repository::find_user_by_email(conn, &email).await?.is_some() {
        return Err(ServiceError::Conflict("Email already registered".to_string()));
    }

    let hashed = hash_blocking(password.to_string()).await?;

    // A concurrent registration can still win the race; the unique index decides.
    let user = repository::insert_user(conn, &email, &hashed)
        .await
        .map_err(|e| conflict_on_unique(e, || "Email already registered".to_string()))?;

    tracing::info!("Registered user {} ({})", user.id, user.email);
    Ok(user)
}

/// Check a login. Unknown email, wrong password and inactive account are indistinguishable.
pub async fn authenticate(conn: &mut PgConnection, email: &str, password: &str) -> Result<User, ServiceError> {
    let invalid = || ServiceError::Unauthorized("Incorrect email or password".to_string());

    let Some(user) = repository::find_user_by_email(conn, email.trim()).await? else {
        tracing::warn!("Login attempt for unknown email");
        return Err(invalid());
    };

    let hashed = user.hashed_password.clone();
    let password = password.to_string();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hashed))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    if !matches || !user.is_active {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(invalid());
    }
    Ok(user)
}

/// The user together with its subjects and their definitions.
pub async fn profile(conn: &mut PgConnection, user: User) -> Result<UserProfile, ServiceError> {
    let subjects = repository::list_subjects(conn, user.id, Page::ALL).await?;
    let ids: Vec<i64> = subjects.iter().map(|s| s.id).collect();
    let definitions = repository::list_definitions_for_subjects(conn, &ids).await?;

    Ok(UserProfile {
        user,
        subjects: SubjectWithDefinitions::group(subjects, definitions),
    })
}

async fn hash_blocking(password: String) -> Result<String, ServiceError> {
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))??;
    Ok(hashed)
}

/// Minimal shape check: one `@`, a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<String, ServiceError> {
    let email = email.trim();
    let invalid = || ServiceError::invalid_field("email", "value is not a valid email address");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(email.to_string())
}
