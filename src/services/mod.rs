pub mod access;
pub mod definition_service;
pub mod score_service;
pub mod subject_service;
pub mod user_service;

use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// Failure kinds shared by every record operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message}")]
    Validation { message: String, field: Option<String> },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation { message: message.into(), field: None }
    }

    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        ServiceError::Validation { message: message.into(), field: Some(field.to_string()) }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(DatabaseError::Sqlx(err))
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ServiceError::Unauthorized(err.to_string()),
            AuthError::Hashing(_) | AuthError::TokenGeneration(_) => ServiceError::Internal(err.to_string()),
        }
    }
}

/// Turn a unique-constraint violation into `Conflict`; anything else stays a database error.
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: impl FnOnce() -> String) -> ServiceError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ServiceError::Conflict(message()),
        _ => err.into(),
    }
}

/// Trimmed, non-empty name or a validation error naming the field.
pub(crate) fn require_name(field: &str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::invalid_field(field, format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions are stored as NULL.
pub(crate) fn normalize_description(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_name_trims_and_rejects_blank() {
        assert_eq!(require_name("name", "  Alice ").unwrap(), "Alice");
        match require_name("name", "   ") {
            Err(ServiceError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("name")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(normalize_description(None), None);
        assert_eq!(normalize_description(Some("  ")), None);
        assert_eq!(normalize_description(Some(" quiet ")), Some("quiet".to_string()));
    }

    #[test]
    fn non_unique_errors_stay_database_errors() {
        let err = conflict_on_unique(sqlx::Error::RowNotFound, || "dup".to_string());
        assert!(matches!(err, ServiceError::Database(_)));
    }

    #[test]
    fn auth_errors_map_to_service_errors() {
        assert!(matches!(ServiceError::from(AuthError::InvalidCredentials), ServiceError::Unauthorized(_)));
        assert!(matches!(ServiceError::from(AuthError::Hashing("x".into())), ServiceError::Internal(_)));
    }
}
