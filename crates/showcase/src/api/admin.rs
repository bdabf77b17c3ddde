use std::path::PathBuf;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::AppState;
use super::error::ApiError;
use crate::auth::AdminSession;
use crate::entity::project::Model as ProjectModel;
use crate::entity::project_origin::ProjectOrigin;
use crate::ingest::UploadedFile;
use crate::projects::{self, ProjectUpdate};
use crate::repository::ProjectFilter;
use crate::viewer::{self, ViewerError};
use crate::{settings, sync};

/// Multipart field carrying the archive.
const UPLOAD_FIELD: &str = "file";

// ─── Projects ────────────────────────────────────────────────────────────────

pub(super) async fn get_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let project = projects::get(&state.db, id).await?;
    Ok(Json(json!({ "success": true, "data": project })))
}

pub(super) async fn update_project(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ProjectUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(changes) = body?;
    let project = projects::update(&admin, &state.db, id, changes).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Project updated successfully",
        "data": project,
    })))
}

pub(super) async fn delete_project(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    projects::delete(&admin, &state.db, id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Project deleted successfully",
    })))
}

fn extracted_root(project: &ProjectModel) -> Result<PathBuf, ViewerError> {
    project
        .extracted_path
        .as_deref()
        .map(PathBuf::from)
        .ok_or(ViewerError::NotExtracted)
}

pub(super) async fn project_files(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let details = projects::get(&state.db, id).await?;
    let root = extracted_root(&details.project)?;
    let files = tokio::task::spawn_blocking(move || viewer::list_files(&root)).await??;

    Ok(Json(json!({
        "success": true,
        "data": {
            "project": { "id": details.project.id, "title": details.project.title },
            "files": files,
        },
    })))
}

pub(super) async fn project_demo(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let details = projects::get(&state.db, id).await?;
    let root = extracted_root(&details.project)?;
    let html = tokio::task::spawn_blocking(move || viewer::read_demo(&root)).await??;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        html,
    )
        .into_response())
}

// ─── Upload ──────────────────────────────────────────────────────────────────

/// Read the `file` field of a multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        return Ok(UploadedFile::new(file_name, content_type, bytes.to_vec()));
    }
    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

pub(super) async fn upload_project(
    admin: AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let file = read_upload(multipart).await?;
    let outcome = state.ingestor.ingest(&admin, file).await?;

    let technologies: Vec<&str> = outcome.technologies.iter().map(|t| t.name.as_str()).collect();
    let mut body = json!({
        "success": true,
        "message": "Project uploaded successfully",
        "project": {
            "id": outcome.project.id,
            "title": outcome.project.title,
            "filePath": outcome.project.zip_file_path,
        },
        "technologies": technologies,
    });
    if let Some(error) = outcome.analysis_error {
        body["analysisError"] = Value::String(error);
    }
    Ok(Json(body))
}

pub(super) async fn list_uploaded_projects(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let filter = ProjectFilter {
        origin: Some(ProjectOrigin::Manual),
        ..Default::default()
    };
    let projects = projects::list(&state.db, &filter).await?;
    Ok(Json(json!({ "success": true, "data": projects })))
}

pub(super) async fn reanalyze_projects(
    admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let report = state.ingestor.reanalyze_all(&admin).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!(
            "Re-analyzed {} projects ({} succeeded, {} failed)",
            report.total, report.succeeded, report.failed
        ),
        "results": report,
    })))
}

// ─── GitHub sync ─────────────────────────────────────────────────────────────

pub(super) async fn sync_github(
    admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let source = state
        .github
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("GitHub sync is not configured".to_string()))?;

    tracing::info!(user = admin.user_id(), owner = %source.owner, "GitHub sync requested");
    let report = sync::sync_all(&state.db, source.api.as_ref(), &source.owner).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!(
            "Synced {} repositories ({} created, {} updated, {} errors)",
            report.total, report.created, report.updated, report.errors
        ),
        "results": report,
    })))
}

pub(super) async fn sync_status(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let overview = projects::sync_overview(&state.db).await?;
    Ok(Json(json!({ "success": true, "data": overview })))
}

// ─── Settings and dashboard ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(super) struct UploadSettingsBody {
    #[serde(rename = "maxFileSizeMB")]
    max_file_size_mb: i64,
}

pub(super) async fn get_upload_settings(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let current = settings::load(&state.db, state.default_max_file_size_mb()).await?;
    Ok(Json(json!({ "success": true, "data": current })))
}

pub(super) async fn update_upload_settings(
    admin: AdminSession,
    State(state): State<AppState>,
    body: Result<Json<UploadSettingsBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let updated = settings::update(&admin, &state.db, body.max_file_size_mb).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Upload settings updated successfully",
        "data": updated,
    })))
}

pub(super) async fn dashboard_stats(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let stats = projects::stats(&state.db).await?;
    Ok(Json(json!({
        "success": true,
        "stats": stats.totals,
        "projects": stats.recent_projects,
    })))
}
