//! HTTP API.
//!
//! Public routes serve the portfolio; every other route requires an admin
//! bearer token, checked by the [`AdminSession`](crate::auth::AdminSession)
//! extractor before the handler runs.
//!
//! # Module Structure
//!
//! - [`error`] - `ApiError` and the JSON error envelope
//! - `extract` - Bearer-token admin extractor
//! - `public` - Health, project listing and technology cloud
//! - `admin` - Project administration, upload, re-analysis, sync and settings

mod admin;
pub mod error;
mod extract;
mod public;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use crate::auth::SessionProvider;
use crate::github::GitHubApi;
use crate::ingest::Ingestor;
use crate::settings::MAX_FILE_SIZE_MB;

pub use error::ApiError;

/// Body limit for uploads: the largest configurable file size plus room for
/// multipart framing. The effective limit is enforced by the pipeline.
pub const UPLOAD_BODY_LIMIT: usize = (MAX_FILE_SIZE_MB as usize + 1) * 1024 * 1024;

/// The account synced from GitHub.
#[derive(Clone)]
pub struct GitHubSource {
    pub api: Arc<dyn GitHubApi>,
    pub owner: String,
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub ingestor: Ingestor,
    pub sessions: Arc<dyn SessionProvider>,
    /// `None` when no GitHub account is configured.
    pub github: Option<GitHubSource>,
}

impl AppState {
    pub fn default_max_file_size_mb(&self) -> u64 {
        self.ingestor.config().default_max_file_size_mb
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(public::health))
        .route("/api/projects", get(public::list_projects))
        .route("/api/technologies", get(public::list_technologies))
        .route(
            "/api/projects/{id}",
            get(admin::get_project)
                .put(admin::update_project)
                .delete(admin::delete_project),
        )
        .route("/api/projects/{id}/files", get(admin::project_files))
        .route("/api/projects/{id}/demo", get(admin::project_demo))
        .route(
            "/api/upload-project",
            post(admin::upload_project)
                .get(admin::list_uploaded_projects)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/reanalyze-projects", post(admin::reanalyze_projects))
        .route(
            "/api/sync-github",
            post(admin::sync_github).get(admin::sync_status),
        )
        .route(
            "/api/admin/upload-settings",
            get(admin::get_upload_settings).post(admin::update_upload_settings),
        )
        .route("/api/admin/stats", get(admin::dashboard_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
