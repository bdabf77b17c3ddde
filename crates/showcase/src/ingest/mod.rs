//! Upload ingestion and re-analysis.
//!
//! An upload is validated, stored under a timestamped name, extracted into a
//! directory keyed by the new project id and analyzed. Analysis is best
//! effort: when extraction or analysis fails the project is still created
//! with a minimal description, and the stored archive is kept so it can be
//! re-analyzed later.
//!
//! # Module Structure
//!
//! - [`naming`] - Stored-file names and titles
//! - `validate` - Upload validation against the current limit
//! - `pipeline` - The upload path
//! - `reanalyze` - Re-extraction and re-analysis of stored archives

mod locks;
pub mod naming;
mod pipeline;
mod reanalyze;
mod validate;

use std::io;
use std::path::{Path, PathBuf};

use sea_orm::DatabaseConnection;
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::{self, AnalysisError, ProjectAnalysis};
use crate::archive::{self, ExtractionError};
use crate::entity::project::Model as ProjectModel;
use crate::entity::technology::Model as TechnologyModel;
use crate::repository::RepositoryError;
use crate::settings::SettingsError;

use locks::ProjectLocks;

pub use reanalyze::{ReanalysisEntry, ReanalysisReport, ReanalysisStatus};
pub use validate::UploadedFile;

/// Name of the directory under the uploads root holding extracted trees.
pub const EXTRACTED_DIR: &str = "extracted";

/// Errors raised by ingestion and re-analysis.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{0}")]
    Validation(String),

    #[error("Project not found: {0}")]
    NotFound(Uuid),

    #[error("Project {0} has no stored archive")]
    NoArchive(Uuid),

    #[error("Storage error at {path}: {source}")]
    Storage { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IngestError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn storage(path: &Path, source: io::Error) -> Self {
        Self::Storage {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<sea_orm::DbErr> for IngestError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Repository(RepositoryError::from(err))
    }
}

/// Where uploads live and which limit applies when none is stored.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub uploads_dir: PathBuf,
    pub default_max_file_size_mb: u64,
}

/// Result of an upload.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub project: ProjectModel,
    pub technologies: Vec<TechnologyModel>,
    /// Why analysis was skipped, when it was.
    pub analysis_error: Option<String>,
}

/// Runs uploads and re-analysis against one database and uploads root.
#[derive(Debug, Clone)]
pub struct Ingestor {
    db: DatabaseConnection,
    config: IngestConfig,
    locks: ProjectLocks,
}

impl Ingestor {
    pub fn new(db: DatabaseConnection, config: IngestConfig) -> Self {
        Self {
            db,
            config,
            locks: ProjectLocks::default(),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Extraction directory for a project.
    pub fn extracted_dir(&self, project_id: Uuid) -> PathBuf {
        self.config
            .uploads_dir
            .join(EXTRACTED_DIR)
            .join(project_id.to_string())
    }

    /// Extract `archive` into the project's directory and analyze it.
    ///
    /// Holds the project's lock for the whole step and runs the blocking work
    /// on the blocking pool.
    async fn extract_and_analyze(
        &self,
        project_id: Uuid,
        archive_path: PathBuf,
    ) -> Result<(ProjectAnalysis, PathBuf), IngestError> {
        let dest = self.extracted_dir(project_id);
        let _guard = self.locks.lock(project_id).await;

        let target = dest.clone();
        let analysis = tokio::task::spawn_blocking(move || {
            let entries = archive::extract(&archive_path, &target)?;
            tracing::debug!(
                project_id = %project_id,
                entries = entries.len(),
                "Archive extracted for analysis"
            );
            analysis::analyze(&target).map_err(IngestError::from)
        })
        .await??;

        Ok((analysis, dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_displays_its_message() {
        let err = IngestError::validation("Only ZIP files are allowed");
        assert_eq!(err.to_string(), "Only ZIP files are allowed");
    }

    #[test]
    fn test_db_errors_become_repository_errors() {
        let err: IngestError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, IngestError::Repository(RepositoryError::Database(_))));
    }
}
