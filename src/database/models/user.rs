use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::subject::SubjectWithDefinitions;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A user as returned by the API, with the subjects it owns.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub subjects: Vec<SubjectWithDefinitions>,
}
