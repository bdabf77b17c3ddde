use axum::Json;
use axum::extract::{Query, State};
use serde_json::{Value, json};

use super::AppState;
use super::error::ApiError;
use crate::entity::project_status::ProjectStatus;
use crate::projects;
use crate::repository::{self, ProjectFilter};

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Active projects only; `status` in the query is ignored.
pub(super) async fn list_projects(
    State(state): State<AppState>,
    Query(mut filter): Query<ProjectFilter>,
) -> Result<Json<Value>, ApiError> {
    filter.status = Some(ProjectStatus::Active);
    let projects = projects::list(&state.db, &filter).await?;
    Ok(Json(json!({ "success": true, "data": projects })))
}

pub(super) async fn list_technologies(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let technologies = repository::list_technologies_with_usage(&state.db).await?;
    Ok(Json(json!({ "success": true, "data": technologies })))
}
