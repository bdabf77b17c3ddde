//! Project reads, admin edits and dashboard aggregates.

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::entity::project::{ActiveModel, Model as ProjectModel};
use crate::entity::project_origin::ProjectOrigin;
use crate::entity::project_status::ProjectStatus;
use crate::entity::technology::Model as TechnologyModel;
use crate::repository::{self, ProjectFilter, RepositoryError};

/// How many projects the dashboard lists as recent.
pub const DASHBOARD_RECENT: u64 = 10;

/// How many synced projects the sync overview lists.
pub const SYNC_OVERVIEW_RECENT: u64 = 5;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<DbErr> for ProjectError {
    fn from(err: DbErr) -> Self {
        Self::Repository(err.into())
    }
}

fn not_found_as(id: Uuid) -> impl FnOnce(RepositoryError) -> ProjectError {
    move |err| {
        if err.is_not_found() {
            ProjectError::NotFound(id)
        } else {
            ProjectError::Repository(err)
        }
    }
}

/// A project together with its linked technologies.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub project: ProjectModel,
    pub technologies: Vec<TechnologyModel>,
}

/// Fields an admin may edit. Absent fields are left unchanged; an empty
/// string clears an optional text field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<ProjectStatus>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    /// Replaces the technology set exactly when present.
    pub technologies: Option<Vec<String>>,
}

fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

async fn with_technologies<C: ConnectionTrait>(
    db: &C,
    project: ProjectModel,
) -> Result<ProjectDetails, ProjectError> {
    let technologies = repository::technologies_for_project(db, project.id).await?;
    Ok(ProjectDetails {
        project,
        technologies,
    })
}

/// One project with its technologies.
pub async fn get<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<ProjectDetails, ProjectError> {
    let project = repository::get_project(db, id)
        .await
        .map_err(not_found_as(id))?;
    with_technologies(db, project).await
}

/// Projects matching `filter`, featured first, each with its technologies.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &ProjectFilter,
) -> Result<Vec<ProjectDetails>, ProjectError> {
    let projects = repository::list_projects(db, filter).await?;
    let mut details = Vec::with_capacity(projects.len());
    for project in projects {
        details.push(with_technologies(db, project).await?);
    }
    Ok(details)
}

/// Apply an admin edit in one transaction.
pub async fn update(
    admin: &AdminSession,
    db: &DatabaseConnection,
    id: Uuid,
    changes: ProjectUpdate,
) -> Result<ProjectDetails, ProjectError> {
    let txn = db.begin().await?;
    let project = repository::get_project(&txn, id)
        .await
        .map_err(not_found_as(id))?;

    let mut model: ActiveModel = project.into();
    if let Some(title) = changes.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(ProjectError::InvalidInput("Title must not be empty".to_string()));
        }
        model.title = Set(title.to_string());
    }
    if let Some(description) = changes.description {
        model.description = Set(optional_text(description));
    }
    if let Some(category) = changes.category
        && let Some(category) = optional_text(category)
    {
        model.category = Set(category);
    }
    if let Some(featured) = changes.featured {
        model.featured = Set(featured);
    }
    if let Some(status) = changes.status {
        model.status = Set(status);
    }
    if let Some(url) = changes.github_url {
        model.github_url = Set(optional_text(url));
    }
    if let Some(url) = changes.live_url {
        model.live_url = Set(optional_text(url));
    }
    model.updated_at = Set(Utc::now().fixed_offset());

    let project = repository::update_project(&txn, model).await?;

    if let Some(names) = changes.technologies {
        let technologies = repository::find_or_create_technologies(&txn, &names).await?;
        let ids: Vec<Uuid> = technologies.iter().map(|t| t.id).collect();
        repository::replace_project_technologies(&txn, id, &ids).await?;
    }

    let details = with_technologies(&txn, project).await?;
    txn.commit().await?;

    tracing::info!(user = admin.user_id(), project_id = %id, "Project updated");
    Ok(details)
}

/// Delete a project and its technology links in one transaction.
pub async fn delete(
    admin: &AdminSession,
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<(), ProjectError> {
    let txn = db.begin().await?;
    repository::get_project(&txn, id)
        .await
        .map_err(not_found_as(id))?;
    let links = repository::delete_for_project(&txn, id).await?;
    repository::delete_project(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(user = admin.user_id(), project_id = %id, links, "Project deleted");
    Ok(())
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub total_projects: u64,
    pub github_projects: u64,
    pub manual_projects: u64,
    pub featured_projects: u64,
    pub total_technologies: u64,
    pub total_stars: i64,
}

/// Dashboard counters and the most recently updated projects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub totals: DashboardTotals,
    pub recent_projects: Vec<ProjectDetails>,
}

pub async fn stats<C: ConnectionTrait>(db: &C) -> Result<DashboardStats, ProjectError> {
    let by_origin = |origin| ProjectFilter {
        origin: Some(origin),
        ..Default::default()
    };
    let featured = ProjectFilter {
        featured: Some(true),
        ..Default::default()
    };

    let totals = DashboardTotals {
        total_projects: repository::count_projects(db, &ProjectFilter::default()).await?,
        github_projects: repository::count_projects(db, &by_origin(ProjectOrigin::GitHub)).await?,
        manual_projects: repository::count_projects(db, &by_origin(ProjectOrigin::Manual)).await?,
        featured_projects: repository::count_projects(db, &featured).await?,
        total_technologies: repository::count_technologies(db).await?,
        total_stars: repository::total_stars(db).await?,
    };

    let mut recent_projects = Vec::new();
    for project in repository::recent_projects(db, None, DASHBOARD_RECENT).await? {
        recent_projects.push(with_technologies(db, project).await?);
    }

    Ok(DashboardStats {
        totals,
        recent_projects,
    })
}

/// Synced-project count and the most recently updated ones.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOverview {
    pub total_github_projects: u64,
    pub recent_projects: Vec<ProjectModel>,
}

pub async fn sync_overview<C: ConnectionTrait>(db: &C) -> Result<SyncOverview, ProjectError> {
    let filter = ProjectFilter {
        origin: Some(ProjectOrigin::GitHub),
        ..Default::default()
    };
    Ok(SyncOverview {
        total_github_projects: repository::count_projects(db, &filter).await?,
        recent_projects: repository::recent_projects(db, Some(ProjectOrigin::GitHub), SYNC_OVERVIEW_RECENT)
            .await?,
    })
}
