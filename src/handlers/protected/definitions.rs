use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::BehaviorDefinition;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, DbConn};
use crate::services::{access, definition_service};

use super::PageQuery;

#[derive(Debug, Deserialize)]
pub struct DefinitionCreate {
    pub name: String,
    pub description: Option<String>,
}

/// POST /subjects/:subject_id/definitions/ - Add a behavior definition to an owned subject
///
/// Ownership is checked before the body, so a foreign subject answers 403 whatever the payload.
pub async fn create(
    user: AuthUser,
    mut conn: DbConn,
    subject_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DefinitionCreate>, JsonRejection>,
) -> ApiResult<BehaviorDefinition> {
    let Path(subject_id) = subject_id?;

    let subject = access::verify_ownership(&mut conn, subject_id, user.id()).await?;
    let Json(payload) = payload?;
    let definition =
        definition_service::create_definition(&mut conn, &payload.name, payload.description.as_deref(), subject.id)
            .await?;
    Ok(ApiResponse::created(definition))
}

/// GET /subjects/:subject_id/definitions/ - Definitions of an owned subject in creation order
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    mut conn: DbConn,
    subject_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Vec<BehaviorDefinition>> {
    let Path(subject_id) = subject_id?;
    let Query(query) = query?;
    let page = query.resolve(&state.config.api)?;

    let subject = access::verify_ownership(&mut conn, subject_id, user.id()).await?;
    let definitions = definition_service::list_definitions(&mut conn, subject.id, page).await?;
    Ok(ApiResponse::success(definitions))
}
