use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::definition::BehaviorDefinition;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BehaviorScore {
    pub id: i64,
    pub score: i32,
    pub date: NaiveDate,
    pub subject_id: i64,
    pub behavior_definition_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreWithDefinition {
    #[serde(flatten)]
    pub score: BehaviorScore,
    pub definition: BehaviorDefinition,
}
