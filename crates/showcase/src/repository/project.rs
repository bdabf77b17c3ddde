use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entity::project::{ActiveModel, Column, Entity as Project, Model};
use crate::entity::project_origin::ProjectOrigin;
use crate::entity::project_status::ProjectStatus;

use super::errors::{RepositoryError, Result};

// ─── Single Record Operations ────────────────────────────────────────────────

/// Insert a new project.
///
/// # Errors
/// Returns `RepositoryError::Database` if the insert fails (e.g., duplicate `github_id`).
pub async fn insert<C: ConnectionTrait>(db: &C, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(RepositoryError::from)
}

/// Find a project by its UUID.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>> {
    Project::find_by_id(id)
        .one(db)
        .await
        .map_err(RepositoryError::from)
}

/// Find a project by its UUID, failing with `NotFound` when absent.
pub async fn get<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Model> {
    find_by_id(db, id)
        .await?
        .ok_or_else(|| RepositoryError::not_found_by_id(id))
}

/// Find a project by its external GitHub repository id.
pub async fn find_by_github_id<C: ConnectionTrait>(
    db: &C,
    github_id: i64,
) -> Result<Option<Model>> {
    Project::find()
        .filter(Column::GithubId.eq(github_id))
        .one(db)
        .await
        .map_err(RepositoryError::from)
}

/// Update an existing project.
pub async fn update<C: ConnectionTrait>(db: &C, model: ActiveModel) -> Result<Model> {
    model.update(db).await.map_err(RepositoryError::from)
}

/// Delete a project row by id. Association rows must be removed first.
///
/// Returns the number of rows deleted (0 or 1).
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64> {
    let result = Project::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Optional filters for listing projects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub origin: Option<ProjectOrigin>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<ProjectStatus>,
}

/// List projects matching `filter`, featured first, then most recently updated.
pub async fn list<C: ConnectionTrait>(db: &C, filter: &ProjectFilter) -> Result<Vec<Model>> {
    Project::find()
        .apply_if(filter.origin, |q, origin| q.filter(Column::Origin.eq(origin)))
        .apply_if(filter.category.clone(), |q, category| {
            q.filter(Column::Category.eq(category))
        })
        .apply_if(filter.featured, |q, featured| {
            q.filter(Column::Featured.eq(featured))
        })
        .apply_if(filter.status, |q, status| q.filter(Column::Status.eq(status)))
        .order_by_desc(Column::Featured)
        .order_by_desc(Column::UpdatedAt)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}

/// Manual projects that still have a stored archive to re-analyze.
pub async fn list_manual_with_archive<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>> {
    Project::find()
        .filter(Column::Origin.eq(ProjectOrigin::Manual))
        .filter(Column::ZipFilePath.is_not_null())
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}

/// The `limit` most recently updated projects, optionally restricted to one origin.
pub async fn recent<C: ConnectionTrait>(
    db: &C,
    origin: Option<ProjectOrigin>,
    limit: u64,
) -> Result<Vec<Model>> {
    Project::find()
        .apply_if(origin, |q, origin| q.filter(Column::Origin.eq(origin)))
        .order_by_desc(Column::UpdatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}

/// Count projects matching `filter`.
pub async fn count<C: ConnectionTrait>(db: &C, filter: &ProjectFilter) -> Result<u64> {
    Project::find()
        .apply_if(filter.origin, |q, origin| q.filter(Column::Origin.eq(origin)))
        .apply_if(filter.featured, |q, featured| {
            q.filter(Column::Featured.eq(featured))
        })
        .count(db)
        .await
        .map_err(RepositoryError::from)
}

/// Sum of star counts across all projects.
pub async fn total_stars<C: ConnectionTrait>(db: &C) -> Result<i64> {
    let total: Option<Option<i64>> = Project::find()
        .select_only()
        .column_as(Column::Stars.sum(), "total")
        .into_tuple()
        .one(db)
        .await?;
    Ok(total.flatten().unwrap_or(0))
}
