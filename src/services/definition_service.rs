use sqlx::PgConnection;

use crate::database::models::BehaviorDefinition;
use crate::database::repository::{self, Page};

use super::{conflict_on_unique, normalize_description, require_name, ServiceError};

/// Create a definition under a subject whose ownership the caller already verified.
pub async fn create_definition(
    conn: &mut PgConnection,
    name: &str,
    description: Option<&str>,
    subject_id: i64,
) -> Result<BehaviorDefinition, ServiceError> {
    let name = require_name("name", name)?;
    let description = normalize_description(description);

    let definition = repository::insert_definition(conn, &name, description.as_deref(), subject_id)
        .await
        .map_err(|e| {
            conflict_on_unique(e, || format!("Behavior definition '{}' already exists for this subject", name))
        })?;

    tracing::info!("Created behavior definition {} on subject {}", definition.id, subject_id);
    Ok(definition)
}

pub async fn list_definitions(
    conn: &mut PgConnection,
    subject_id: i64,
    page: Page,
) -> Result<Vec<BehaviorDefinition>, ServiceError> {
    Ok(repository::list_definitions(conn, subject_id, page).await?)
}
