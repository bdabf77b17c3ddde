use std::collections::HashSet;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::project_technology::{
    ActiveModel as LinkActiveModel, Column as LinkColumn, Entity as ProjectTechnology,
};
use crate::entity::technology::{Column as TechnologyColumn, Entity as Technology, Model};

use super::errors::{RepositoryError, Result};

/// Technologies associated with a project, ordered by name.
pub async fn technologies_for_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<Vec<Model>> {
    Technology::find()
        .inner_join(ProjectTechnology)
        .filter(LinkColumn::ProjectId.eq(project_id))
        .order_by_asc(TechnologyColumn::Name)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}

/// Remove every association row of a project.
pub async fn delete_for_project<C: ConnectionTrait>(db: &C, project_id: Uuid) -> Result<u64> {
    let result = ProjectTechnology::delete_many()
        .filter(LinkColumn::ProjectId.eq(project_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Replace a project's technology set wholesale.
///
/// Afterwards exactly `technology_ids` (deduplicated) are linked. Callers run
/// this inside the same transaction as the project write.
pub async fn replace_project_technologies<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    technology_ids: &[Uuid],
) -> Result<()> {
    delete_for_project(db, project_id).await?;

    let mut seen = HashSet::new();
    let links: Vec<LinkActiveModel> = technology_ids
        .iter()
        .filter(|id| seen.insert(**id))
        .map(|technology_id| LinkActiveModel {
            project_id: Set(project_id),
            technology_id: Set(*technology_id),
        })
        .collect();

    if links.is_empty() {
        return Ok(());
    }

    ProjectTechnology::insert_many(links)
        .exec_without_returning(db)
        .await?;
    Ok(())
}
