use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::SubjectWithDefinitions;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, DbConn};
use crate::services::subject_service;

use super::PageQuery;

#[derive(Debug, Deserialize)]
pub struct SubjectCreate {
    pub name: String,
    pub description: Option<String>,
}

/// POST /subjects/ - Create a subject owned by the caller; 400 on a duplicate name
pub async fn create(
    user: AuthUser,
    mut conn: DbConn,
    payload: Result<Json<SubjectCreate>, JsonRejection>,
) -> ApiResult<SubjectWithDefinitions> {
    let Json(payload) = payload?;

    let subject =
        subject_service::create_subject(&mut conn, &payload.name, payload.description.as_deref(), user.id()).await?;
    Ok(ApiResponse::created(subject))
}

/// GET /subjects/ - The caller's subjects in creation order
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    mut conn: DbConn,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Vec<SubjectWithDefinitions>> {
    let Query(query) = query?;
    let page = query.resolve(&state.config.api)?;
    let subjects = subject_service::list_subjects(&mut conn, user.id(), page).await?;
    Ok(ApiResponse::success(subjects))
}
