//! The upload path.

use std::path::Path;

use chrono::Utc;
use sea_orm::{Set, TransactionTrait};
use serde_json::json;
use uuid::Uuid;

use super::naming::{sanitize_file_name, stored_file_name, title_from_file_name};
use super::validate::{UploadedFile, validate};
use super::{IngestError, IngestOutcome, Ingestor};
use crate::auth::AdminSession;
use crate::entity::project::ActiveModel;
use crate::entity::project_origin::ProjectOrigin;
use crate::entity::project_status::ProjectStatus;
use crate::repository;
use crate::settings;

/// Category given to uploaded projects.
const MANUAL_CATEGORY: &str = "personal";

impl Ingestor {
    /// Store, extract and analyze an uploaded archive, then create its project.
    ///
    /// Extraction and analysis failures are logged and produce a project
    /// without analysis results; they never fail the upload.
    ///
    /// # Errors
    /// `Validation` for rejected uploads, `Storage` when the archive cannot be
    /// written, `Repository` when the project cannot be persisted.
    pub async fn ingest(
        &self,
        admin: &AdminSession,
        file: UploadedFile,
    ) -> Result<IngestOutcome, IngestError> {
        let limits = settings::load(&self.db, self.config.default_max_file_size_mb).await?;
        validate(&file, &limits)?;

        let uploads_dir = &self.config.uploads_dir;
        tokio::fs::create_dir_all(uploads_dir)
            .await
            .map_err(|e| IngestError::storage(uploads_dir, e))?;

        let sanitized = sanitize_file_name(&file.file_name);
        let stored_path =
            uploads_dir.join(stored_file_name(Utc::now().timestamp_millis(), &sanitized));
        tokio::fs::write(&stored_path, &file.bytes)
            .await
            .map_err(|e| IngestError::storage(&stored_path, e))?;

        tracing::info!(
            user = admin.user_id(),
            file = %file.file_name,
            stored = %stored_path.display(),
            size = file.bytes.len(),
            "Upload stored"
        );

        let project_id = Uuid::new_v4();
        let mut model = new_manual_project(project_id, title_from_file_name(&sanitized), &stored_path);

        let (names, analysis_error) = match self.extract_and_analyze(project_id, stored_path.clone()).await {
            Ok((analysis, dest)) => {
                model.description = Set(Some(analysis.description.clone()));
                model.content = Set(analysis.readme.clone());
                model.main_files = Set(json!(analysis.main_files));
                model.preview_files = Set(json!(analysis.preview_files));
                model.extracted_path = Set(Some(dest.to_string_lossy().into_owned()));
                (analysis.technology_names(), None)
            }
            Err(e) => {
                tracing::warn!(
                    project_id = %project_id,
                    file = %file.file_name,
                    error = %e,
                    "Analysis failed, creating project without it"
                );
                model.description = Set(Some(format!("Project uploaded from {}", file.file_name)));
                (Vec::new(), Some(e.to_string()))
            }
        };

        let txn = self.db.begin().await?;
        let project = repository::insert_project(&txn, model).await?;
        let technologies = repository::find_or_create_technologies(&txn, &names).await?;
        let ids: Vec<Uuid> = technologies.iter().map(|t| t.id).collect();
        repository::replace_project_technologies(&txn, project.id, &ids).await?;
        txn.commit().await?;

        tracing::info!(
            project_id = %project.id,
            title = %project.title,
            technologies = technologies.len(),
            analyzed = analysis_error.is_none(),
            "Project created from upload"
        );

        Ok(IngestOutcome {
            project,
            technologies,
            analysis_error,
        })
    }
}

fn new_manual_project(id: Uuid, title: String, stored_path: &Path) -> ActiveModel {
    let now = Utc::now().fixed_offset();
    ActiveModel {
        id: Set(id),
        title: Set(title),
        description: Set(None),
        content: Set(None),
        github_url: Set(None),
        live_url: Set(None),
        github_id: Set(None),
        stars: Set(None),
        forks: Set(None),
        language: Set(None),
        origin: Set(ProjectOrigin::Manual),
        category: Set(MANUAL_CATEGORY.to_string()),
        status: Set(ProjectStatus::Active),
        featured: Set(false),
        zip_file_path: Set(Some(stored_path.to_string_lossy().into_owned())),
        extracted_path: Set(None),
        main_files: Set(json!([])),
        preview_files: Set(json!([])),
        start_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}
