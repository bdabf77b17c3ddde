//! Technology entity - a normalized skill/tool tag shared across projects.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::technology_category::TechnologyCategory;

/// Technology model.
///
/// The category is assigned once when the row is created and never
/// re-derived afterwards.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "technologies")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub category: TechnologyCategory,
    /// Optional icon glyph.
    pub icon: Option<String>,
    /// Optional display color.
    pub color: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_technology::Entity")]
    ProjectTechnology,
}

impl Related<super::project_technology::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectTechnology.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_technology::Relation::Project.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::project_technology::Relation::Technology.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
