use chrono::NaiveDate;
use sqlx::{Connection, PgConnection};

use crate::database::models::{DefinitionAverage, ScoreWithDefinition};
use crate::database::repository;

use super::ServiceError;

/// Record a score. The caller has verified ownership of `subject_id`; this checks that
/// the definition belongs to that same subject.
pub async fn create_score(
    conn: &mut PgConnection,
    subject_id: i64,
    definition_id: i64,
    score: i32,
    date: NaiveDate,
) -> Result<ScoreWithDefinition, ServiceError> {
    // Dropping the transaction on an early return rolls it back.
    let mut tx = conn.begin().await?;

    let definition = repository::find_definition(&mut tx, definition_id)
        .await?
        .filter(|d| d.subject_id == subject_id)
        .ok_or_else(|| {
            ServiceError::invalid_field(
                "behavior_definition_id",
                format!("Behavior definition {} does not belong to subject {}", definition_id, subject_id),
            )
        })?;

    let created = repository::insert_score(&mut tx, subject_id, definition_id, score, date)
        .await
        .map_err(|e| match &e {
            // The definition was removed or moved between the check and the insert.
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                ServiceError::validation("Behavior definition does not belong to subject")
            }
            _ => e.into(),
        })?;

    tx.commit().await?;

    tracing::info!("Recorded score {} for subject {} / definition {}", created.id, subject_id, definition_id);
    Ok(ScoreWithDefinition { score: created, definition })
}

/// Scores for a subject, each with its definition.
pub async fn list_scores(conn: &mut PgConnection, subject_id: i64) -> Result<Vec<ScoreWithDefinition>, ServiceError> {
    let scores = repository::list_scores(conn, subject_id).await?;
    let definitions = repository::list_definitions_for_subjects(conn, &[subject_id]).await?;

    Ok(scores
        .into_iter()
        .filter_map(|score| {
            definitions
                .iter()
                .find(|d| d.id == score.behavior_definition_id)
                .cloned()
                .map(|definition| ScoreWithDefinition { score, definition })
        })
        .collect())
}

pub async fn averages_by_subject(conn: &mut PgConnection, subject_id: i64) -> Result<Vec<DefinitionAverage>, ServiceError> {
    Ok(repository::averages_by_subject(conn, subject_id).await?)
}
