//! Portfolio sync from a GitHub account.
//!
//! Every repository is processed inside its own error boundary: a failure is
//! recorded in the [`SyncReport`] and the run continues. Only failing to list
//! the account's repositories aborts the run.

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use super::types::{RepoSyncStatus, SyncReport};
use crate::entity::project::ActiveModel;
use crate::entity::project_origin::ProjectOrigin;
use crate::entity::project_status::ProjectStatus;
use crate::github::{GitHubApi, GitHubError, GitHubRepo, categorize_repository, technologies_for};
use crate::repository::{self, RepositoryError};

/// Fatal sync errors.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Cannot list repositories of {owner}: {source}")]
    List { owner: String, source: GitHubError },
}

/// Per-repository failures, folded into the report.
#[derive(Debug, Error)]
enum RepoSyncError {
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sea_orm::DbErr> for RepoSyncError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Repository(err.into())
    }
}

/// Data gathered for one repository before it is persisted.
struct RepoSnapshot {
    repo: GitHubRepo,
    readme: Option<String>,
    technologies: Vec<String>,
    category: &'static str,
}

/// Sync every non-archived repository of `owner` into the project store.
///
/// # Errors
/// `SyncError::List` when the repository listing fails.
pub async fn sync_all(
    db: &DatabaseConnection,
    api: &dyn GitHubApi,
    owner: &str,
) -> Result<SyncReport, SyncError> {
    let repos = api
        .list_repositories(owner)
        .await
        .map_err(|source| SyncError::List {
            owner: owner.to_string(),
            source,
        })?;

    let (repos, archived): (Vec<_>, Vec<_>) = repos.into_iter().partition(|r| !r.archived);
    tracing::info!(owner, repos = repos.len(), archived = archived.len(), "Syncing GitHub repositories");

    let mut report = SyncReport::new(repos.len());
    for repo in &repos {
        match sync_repository(db, api, owner, repo).await {
            Ok((status, technologies)) => report.record_synced(&repo.name, status, technologies),
            Err(e) => {
                tracing::warn!(repo = %repo.full_name, error = %e, "Repository sync failed");
                report.record_error(&repo.name, e.to_string());
            }
        }
    }

    tracing::info!(
        owner,
        total = report.total,
        created = report.created,
        updated = report.updated,
        errors = report.errors,
        "GitHub sync complete"
    );
    Ok(report)
}

async fn sync_repository(
    db: &DatabaseConnection,
    api: &dyn GitHubApi,
    owner: &str,
    listed: &GitHubRepo,
) -> Result<(RepoSyncStatus, usize), RepoSyncError> {
    let snapshot = fetch_snapshot(api, owner, listed).await?;
    persist_snapshot(db, snapshot).await
}

async fn fetch_snapshot(
    api: &dyn GitHubApi,
    owner: &str,
    listed: &GitHubRepo,
) -> Result<RepoSnapshot, RepoSyncError> {
    let full_name = listed.full_name.as_str();
    let repo = api.get_repository(full_name).await?;

    let languages = api.list_languages(full_name).await.unwrap_or_else(|e| {
        tracing::warn!(repo = full_name, error = %e, "Languages unavailable");
        Vec::new()
    });
    let topics = api.list_topics(full_name).await.unwrap_or_else(|e| {
        tracing::warn!(repo = full_name, error = %e, "Topics unavailable");
        Vec::new()
    });
    let readme = api.get_readme(full_name).await.unwrap_or_else(|e| {
        tracing::warn!(repo = full_name, error = %e, "README unavailable");
        None
    });

    Ok(RepoSnapshot {
        technologies: technologies_for(&languages, &topics),
        category: categorize_repository(&repo, &topics, owner),
        repo,
        readme,
    })
}

fn to_fixed(at: Option<DateTime<Utc>>) -> Option<DateTime<FixedOffset>> {
    at.map(|at| at.fixed_offset())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Copy the mutable repository fields onto `model`.
fn apply_snapshot(model: &mut ActiveModel, snapshot: &RepoSnapshot) {
    let repo = &snapshot.repo;
    model.title = Set(repo.name.clone());
    model.description = Set(non_empty(repo.description.as_deref()));
    model.content = Set(snapshot.readme.clone());
    model.github_url = Set(Some(repo.html_url.clone()));
    model.live_url = Set(non_empty(repo.homepage.as_deref()));
    model.stars = Set(Some(repo.stargazers_count as i32));
    model.forks = Set(Some(repo.forks_count as i32));
    model.language = Set(repo.language.clone());
    model.category = Set(snapshot.category.to_string());
    model.start_date = Set(to_fixed(repo.created_at));
    model.updated_at = Set(to_fixed(repo.updated_at).unwrap_or_else(|| Utc::now().fixed_offset()));
}

async fn persist_snapshot(
    db: &DatabaseConnection,
    snapshot: RepoSnapshot,
) -> Result<(RepoSyncStatus, usize), RepoSyncError> {
    let txn = db.begin().await?;

    let (project_id, status) = match repository::find_project_by_github_id(&txn, snapshot.repo.id).await? {
        Some(existing) => {
            let id = existing.id;
            let mut model: ActiveModel = existing.into();
            apply_snapshot(&mut model, &snapshot);
            repository::update_project(&txn, model).await?;
            (id, RepoSyncStatus::Updated)
        }
        None => {
            let id = Uuid::new_v4();
            let now = Utc::now().fixed_offset();
            let mut model = ActiveModel {
                id: Set(id),
                github_id: Set(Some(snapshot.repo.id)),
                origin: Set(ProjectOrigin::GitHub),
                status: Set(ProjectStatus::Active),
                featured: Set(false),
                zip_file_path: Set(None),
                extracted_path: Set(None),
                main_files: Set(json!([])),
                preview_files: Set(json!([])),
                created_at: Set(now),
                ..Default::default()
            };
            apply_snapshot(&mut model, &snapshot);
            repository::insert_project(&txn, model).await?;
            (id, RepoSyncStatus::Created)
        }
    };

    let technologies = repository::find_or_create_technologies(&txn, &snapshot.technologies).await?;
    let ids: Vec<Uuid> = technologies.iter().map(|t| t.id).collect();
    repository::replace_project_technologies(&txn, project_id, &ids).await?;
    txn.commit().await?;

    tracing::debug!(
        repo = %snapshot.repo.full_name,
        project_id = %project_id,
        status = ?status,
        technologies = technologies.len(),
        "Repository synced"
    );
    Ok((status, technologies.len()))
}
