use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::models::{DefinitionAverage, ScoreWithDefinition};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, DbConn};
use crate::services::{access, score_service};

#[derive(Debug, Deserialize)]
pub struct ScoreCreate {
    pub score: i32,
    pub date: NaiveDate,
    pub subject_id: i64,
    pub behavior_definition_id: i64,
}

/// POST /scores/ - Record one dated score
///
/// 404 when the subject does not exist, 403 when it belongs to someone else, 400 when
/// the definition is not one of the subject's definitions.
pub async fn create(
    user: AuthUser,
    mut conn: DbConn,
    payload: Result<Json<ScoreCreate>, JsonRejection>,
) -> ApiResult<ScoreWithDefinition> {
    let Json(payload) = payload?;

    let subject = access::verify_ownership(&mut conn, payload.subject_id, user.id()).await?;
    let score = score_service::create_score(
        &mut conn,
        subject.id,
        payload.behavior_definition_id,
        payload.score,
        payload.date,
    )
    .await?;
    Ok(ApiResponse::created(score))
}

/// GET /subjects/:subject_id/scores/
pub async fn list(
    user: AuthUser,
    mut conn: DbConn,
    subject_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<ScoreWithDefinition>> {
    let Path(subject_id) = subject_id?;
    let subject = access::verify_ownership(&mut conn, subject_id, user.id()).await?;
    let scores = score_service::list_scores(&mut conn, subject.id).await?;
    Ok(ApiResponse::success(scores))
}

/// GET /subjects/:subject_id/scores/averages/ - Mean and count per definition
pub async fn averages(
    user: AuthUser,
    mut conn: DbConn,
    subject_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<DefinitionAverage>> {
    let Path(subject_id) = subject_id?;
    let subject = access::verify_ownership(&mut conn, subject_id, user.id()).await?;
    let averages = score_service::averages_by_subject(&mut conn, subject.id).await?;
    Ok(ApiResponse::success(averages))
}
