//! Sync report types.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoSyncStatus {
    Created,
    Updated,
    Error,
}

/// Outcome for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSyncDetail {
    pub repo: String,
    pub status: RepoSyncStatus,
    /// Number of technologies linked to the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Repositories considered, archived ones excluded.
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub errors: usize,
    pub details: Vec<RepoSyncDetail>,
}

impl SyncReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub(crate) fn record_synced(&mut self, repo: &str, status: RepoSyncStatus, technologies: usize) {
        match status {
            RepoSyncStatus::Created => self.created += 1,
            RepoSyncStatus::Updated => self.updated += 1,
            RepoSyncStatus::Error => self.errors += 1,
        }
        self.details.push(RepoSyncDetail {
            repo: repo.to_string(),
            status,
            technologies: Some(technologies),
            message: None,
        });
    }

    pub(crate) fn record_error(&mut self, repo: &str, message: String) {
        self.errors += 1;
        self.details.push(RepoSyncDetail {
            repo: repo.to_string(),
            status: RepoSyncStatus::Error,
            technologies: None,
            message: Some(message),
        });
    }
}
