use sqlx::PgConnection;

use crate::database::models::{Subject, SubjectWithDefinitions};
use crate::database::repository::{self, Page};

use super::{conflict_on_unique, normalize_description, require_name, ServiceError};

/// Create a subject. Names are unique per owner.
pub async fn create_subject(
    conn: &mut PgConnection,
    name: &str,
    description: Option<&str>,
    owner_id: i64,
) -> Result<SubjectWithDefinitions, ServiceError> {
    let name = require_name("name", name)?;
    let description = normalize_description(description);

    let subject = repository::insert_subject(conn, &name, description.as_deref(), owner_id)
        .await
        .map_err(|e| conflict_on_unique(e, || format!("Subject with name '{}' already exists", name)))?;

    tracing::info!("User {} created subject {} ({})", owner_id, subject.id, subject.name);
    Ok(SubjectWithDefinitions { subject, definitions: Vec::new() })
}

pub async fn list_subjects(
    conn: &mut PgConnection,
    owner_id: i64,
    page: Page,
) -> Result<Vec<SubjectWithDefinitions>, ServiceError> {
    let subjects: Vec<Subject> = repository::list_subjects(conn, owner_id, page).await?;
    let ids: Vec<i64> = subjects.iter().map(|s| s.id).collect();
    let definitions = repository::list_definitions_for_subjects(conn, &ids).await?;

    Ok(SubjectWithDefinitions::group(subjects, definitions))
}
