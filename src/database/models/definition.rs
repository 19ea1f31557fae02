use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BehaviorDefinition {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub subject_id: i64,
}

/// Mean and count of the scores recorded against one definition.
#[derive(Debug, Clone, Serialize)]
pub struct DefinitionAverage {
    pub definition: BehaviorDefinition,
    pub average_score: Option<f64>,
    pub score_count: i64,
}

/// Flat row produced by the averages query.
#[derive(Debug, FromRow)]
pub(crate) struct DefinitionAverageRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub subject_id: i64,
    pub average_score: Option<f64>,
    pub score_count: i64,
}

impl From<DefinitionAverageRow> for DefinitionAverage {
    fn from(row: DefinitionAverageRow) -> Self {
        Self {
            definition: BehaviorDefinition {
                id: row.id,
                name: row.name,
                description: row.description,
                subject_id: row.subject_id,
            },
            average_score: row.average_score,
            score_count: row.score_count,
        }
    }
}
