//! Re-extraction and re-analysis of stored archives.

use std::path::PathBuf;

use chrono::Utc;
use sea_orm::{Set, TransactionTrait};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::{IngestError, Ingestor};
use crate::auth::AdminSession;
use crate::entity::project::{ActiveModel, Model as ProjectModel};
use crate::repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReanalysisStatus {
    Success,
    Error,
}

/// Outcome for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReanalysisEntry {
    pub id: Uuid,
    pub title: String,
    pub status: ReanalysisStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReanalysisEntry {
    fn failed(id: Uuid, title: String, error: &IngestError) -> Self {
        Self {
            id,
            title,
            status: ReanalysisStatus::Error,
            technologies: None,
            description: None,
            error: Some(error.to_string()),
        }
    }
}

/// Folded results of a bulk re-analysis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReanalysisReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<ReanalysisEntry>,
}

impl ReanalysisReport {
    fn record(&mut self, entry: ReanalysisEntry) {
        self.total += 1;
        match entry.status {
            ReanalysisStatus::Success => self.succeeded += 1,
            ReanalysisStatus::Error => self.failed += 1,
        }
        self.results.push(entry);
    }
}

impl Ingestor {
    /// Re-analyze one manual project from its stored archive.
    pub async fn reanalyze(
        &self,
        admin: &AdminSession,
        project_id: Uuid,
    ) -> Result<ReanalysisEntry, IngestError> {
        let project = repository::find_project(&self.db, project_id)
            .await?
            .ok_or(IngestError::NotFound(project_id))?;
        tracing::info!(user = admin.user_id(), project_id = %project_id, "Re-analyzing project");
        self.reanalyze_project(project).await
    }

    /// Re-analyze every manual project that has a stored archive.
    ///
    /// Per-project failures are recorded in the report and do not stop the
    /// run; only failing to list the projects is an error.
    pub async fn reanalyze_all(&self, admin: &AdminSession) -> Result<ReanalysisReport, IngestError> {
        let projects = repository::list_manual_with_archive(&self.db).await?;
        tracing::info!(user = admin.user_id(), projects = projects.len(), "Re-analyzing projects");

        let mut report = ReanalysisReport::default();
        for project in projects {
            let (id, title) = (project.id, project.title.clone());
            match self.reanalyze_project(project).await {
                Ok(entry) => report.record(entry),
                Err(e) => {
                    tracing::warn!(project_id = %id, error = %e, "Re-analysis failed");
                    report.record(ReanalysisEntry::failed(id, title, &e));
                }
            }
        }

        tracing::info!(
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            "Re-analysis complete"
        );
        Ok(report)
    }

    async fn reanalyze_project(&self, project: ProjectModel) -> Result<ReanalysisEntry, IngestError> {
        let Some(archive_path) = project.zip_file_path.clone() else {
            return Err(IngestError::NoArchive(project.id));
        };

        let (analysis, dest) = self
            .extract_and_analyze(project.id, PathBuf::from(archive_path))
            .await?;
        let names = analysis.technology_names();

        let (id, title) = (project.id, project.title.clone());
        let previous_content = project.content.clone();
        let mut model: ActiveModel = project.into();
        model.description = Set(Some(analysis.description.clone()));
        model.content = Set(analysis.readme.clone().or(previous_content));
        model.main_files = Set(json!(analysis.main_files));
        model.preview_files = Set(json!(analysis.preview_files));
        model.extracted_path = Set(Some(dest.to_string_lossy().into_owned()));
        model.updated_at = Set(Utc::now().fixed_offset());

        let txn = self.db.begin().await?;
        repository::update_project(&txn, model).await?;
        let technologies = repository::find_or_create_technologies(&txn, &names).await?;
        let ids: Vec<Uuid> = technologies.iter().map(|t| t.id).collect();
        repository::replace_project_technologies(&txn, id, &ids).await?;
        txn.commit().await?;

        tracing::debug!(project_id = %id, technologies = technologies.len(), "Project re-analyzed");

        Ok(ReanalysisEntry {
            id,
            title,
            status: ReanalysisStatus::Success,
            technologies: Some(technologies.into_iter().map(|t| t.name).collect()),
            description: Some(analysis.description),
            error: None,
        })
    }
}
