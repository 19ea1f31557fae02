//! SQL for the four tables. Every function runs on a caller-provided connection so a
//! request (or a transaction) keeps one connection for its whole unit of work.

use chrono::NaiveDate;
use sqlx::PgConnection;

use super::models::definition::DefinitionAverageRow;
use super::models::{BehaviorDefinition, BehaviorScore, DefinitionAverage, Subject, User};

/// Offset/limit window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    /// Everything from the start; used for nested listings.
    pub const ALL: Page = Page { skip: 0, limit: i64::MAX };
}

// --- Users ---

pub async fn find_user_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, hashed_password, is_active, created_at
         FROM users
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(conn)
    .await
}

pub async fn insert_user(conn: &mut PgConnection, email: &str, hashed_password: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, hashed_password)
         VALUES ($1, $2)
         RETURNING id, email, hashed_password, is_active, created_at",
    )
    .bind(email)
    .bind(hashed_password)
    .fetch_one(conn)
    .await
}

// --- Subjects ---

pub async fn find_subject(conn: &mut PgConnection, subject_id: i64) -> Result<Option<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(
        "SELECT id, name, description, user_id
         FROM subjects
         WHERE id = $1",
    )
    .bind(subject_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert_subject(
    conn: &mut PgConnection,
    name: &str,
    description: Option<&str>,
    user_id: i64,
) -> Result<Subject, sqlx::Error> {
    sqlx::query_as::<_, Subject>(
        "INSERT INTO subjects (name, description, user_id)
         VALUES ($1, $2, $3)
         RETURNING id, name, description, user_id",
    )
    .bind(name)
    .bind(description)
    .bind(user_id)
    .fetch_one(conn)
    .await
}

pub async fn list_subjects(conn: &mut PgConnection, user_id: i64, page: Page) -> Result<Vec<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(
        "SELECT id, name, description, user_id
         FROM subjects
         WHERE user_id = $1
         ORDER BY id
         OFFSET $2 LIMIT $3",
    )
    .bind(user_id)
    .bind(page.skip)
    .bind(page.limit)
    .fetch_all(conn)
    .await
}

// --- Behavior definitions ---

pub async fn find_definition(conn: &mut PgConnection, definition_id: i64) -> Result<Option<BehaviorDefinition>, sqlx::Error> {
    sqlx::query_as::<_, BehaviorDefinition>(
        "SELECT id, name, description, subject_id
         FROM behavior_definitions
         WHERE id = $1",
    )
    .bind(definition_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert_definition(
    conn: &mut PgConnection,
    name: &str,
    description: Option<&str>,
    subject_id: i64,
) -> Result<BehaviorDefinition, sqlx::Error> {
    sqlx::query_as::<_, BehaviorDefinition>(
        "INSERT INTO behavior_definitions (name, description, subject_id)
         VALUES ($1, $2, $3)
         RETURNING id, name, description, subject_id",
    )
    .bind(name)
    .bind(description)
    .bind(subject_id)
    .fetch_one(conn)
    .await
}

pub async fn list_definitions(
    conn: &mut PgConnection,
    subject_id: i64,
    page: Page,
) -> Result<Vec<BehaviorDefinition>, sqlx::Error> {
    sqlx::query_as::<_, BehaviorDefinition>(
        "SELECT id, name, description, subject_id
         FROM behavior_definitions
         WHERE subject_id = $1
         ORDER BY id
         OFFSET $2 LIMIT $3",
    )
    .bind(subject_id)
    .bind(page.skip)
    .bind(page.limit)
    .fetch_all(conn)
    .await
}

/// Definitions for any of the given subjects, in creation order.
pub async fn list_definitions_for_subjects(
    conn: &mut PgConnection,
    subject_ids: &[i64],
) -> Result<Vec<BehaviorDefinition>, sqlx::Error> {
    if subject_ids.is_empty() {
        return Ok(vec![]);
    }
    sqlx::query_as::<_, BehaviorDefinition>(
        "SELECT id, name, description, subject_id
         FROM behavior_definitions
         WHERE subject_id = ANY($1)
         ORDER BY id",
    )
    .bind(subject_ids)
    .fetch_all(conn)
    .await
}

// --- Behavior scores ---

pub async fn insert_score(
    conn: &mut PgConnection,
    subject_id: i64,
    definition_id: i64,
    score: i32,
    date: NaiveDate,
) -> Result<BehaviorScore, sqlx::Error> {
    sqlx::query_as::<_, BehaviorScore>(
        "INSERT INTO behavior_scores (score, date, subject_id, behavior_definition_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id, score, date, subject_id, behavior_definition_id, created_at",
    )
    .bind(score)
    .bind(date)
    .bind(subject_id)
    .bind(definition_id)
    .fetch_one(conn)
    .await
}

pub async fn list_scores(conn: &mut PgConnection, subject_id: i64) -> Result<Vec<BehaviorScore>, sqlx::Error> {
    sqlx::query_as::<_, BehaviorScore>(
        "SELECT id, score, date, subject_id, behavior_definition_id, created_at
         FROM behavior_scores
         WHERE subject_id = $1
         ORDER BY date, id",
    )
    .bind(subject_id)
    .fetch_all(conn)
    .await
}

/// One row per definition of the subject. The join also matches on subject so only
/// scores recorded against this subject count; definitions without scores keep a
/// NULL average and a zero count.
pub async fn averages_by_subject(conn: &mut PgConnection, subject_id: i64) -> Result<Vec<DefinitionAverage>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DefinitionAverageRow>(
        "SELECT d.id, d.name, d.description, d.subject_id,
                AVG(s.score)::FLOAT8 AS average_score,
                COUNT(s.id) AS score_count
         FROM behavior_definitions d
         LEFT JOIN behavior_scores s
                ON s.behavior_definition_id = d.id
               AND s.subject_id = d.subject_id
         WHERE d.subject_id = $1
         GROUP BY d.id, d.name, d.description, d.subject_id
         ORDER BY d.id",
    )
    .bind(subject_id)
    .fetch_all(conn)
    .await?;

    Ok(rows.into_iter().map(DefinitionAverage::from).collect())
}
