use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entity::project_technology::Entity as ProjectTechnology;
use crate::entity::technology::{ActiveModel, Column, Entity as Technology, Model};
use crate::taxonomy;

use super::errors::{RepositoryError, Result};

/// Find a technology by its exact canonical name.
pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>> {
    Technology::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await
        .map_err(RepositoryError::from)
}

/// Return the technology named `name`, creating it when missing.
///
/// Known names are normalized to their canonical spelling. New rows get their
/// category from [`taxonomy::category_for`]; existing rows are returned
/// untouched.
pub async fn find_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model> {
    let name = taxonomy::canonical_name(name);
    if name.is_empty() {
        return Err(RepositoryError::invalid_input("technology name is empty"));
    }

    if let Some(existing) = find_by_name(db, name).await? {
        return Ok(existing);
    }

    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        category: Set(taxonomy::category_for(name)),
        icon: Set(None),
        color: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
    };
    let created = model.insert(db).await?;
    tracing::debug!(name = %created.name, category = %created.category, "Technology created");
    Ok(created)
}

/// Resolve every name, skipping blanks and duplicates, in input order.
pub async fn find_or_create_all<C, S>(db: &C, names: &[S]) -> Result<Vec<Model>>
where
    C: ConnectionTrait,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut technologies = Vec::with_capacity(names.len());
    for name in names {
        let name = taxonomy::canonical_name(name.as_ref());
        if name.is_empty() || !seen.insert(name.to_string()) {
            continue;
        }
        technologies.push(find_or_create(db, name).await?);
    }
    Ok(technologies)
}

/// Count all technologies.
pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64> {
    Technology::find()
        .count(db)
        .await
        .map_err(RepositoryError::from)
}

/// A technology together with the number of projects using it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyUsage {
    #[serde(flatten)]
    pub technology: Model,
    pub project_count: u64,
}

/// All technologies ordered by name, each with its project count.
pub async fn list_with_usage<C: ConnectionTrait>(db: &C) -> Result<Vec<TechnologyUsage>> {
    let technologies = Technology::find()
        .order_by_asc(Column::Name)
        .all(db)
        .await?;

    let mut counts: HashMap<Uuid, u64> = HashMap::new();
    for link in ProjectTechnology::find().all(db).await? {
        *counts.entry(link.technology_id).or_default() += 1;
    }

    Ok(technologies
        .into_iter()
        .map(|technology| TechnologyUsage {
            project_count: counts.get(&technology.id).copied().unwrap_or(0),
            technology,
        })
        .collect())
}
