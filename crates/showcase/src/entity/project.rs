//! Project entity - a portfolio entry sourced from GitHub or an uploaded archive.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::project_origin::ProjectOrigin;
use crate::entity::project_status::ProjectStatus;

/// Project model.
///
/// GitHub-origin rows carry `github_id`, `stars` and `forks`; manual-origin
/// rows carry `zip_file_path` and, once analysis succeeded, `extracted_path`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    // ─── Content ─────────────────────────────────────────────────────────────
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Long-form content, usually the README.
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub github_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub live_url: Option<String>,

    // ─── GitHub ──────────────────────────────────────────────────────────────
    /// External repository id, unique when present.
    #[sea_orm(unique)]
    pub github_id: Option<i64>,
    pub stars: Option<i32>,
    pub forks: Option<i32>,
    /// Primary language label.
    pub language: Option<String>,

    // ─── Classification ──────────────────────────────────────────────────────
    pub origin: ProjectOrigin,
    /// `professional`, `personal`, or an admin-chosen label.
    pub category: String,
    pub status: ProjectStatus,
    #[sea_orm(default_value = false)]
    pub featured: bool,

    // ─── Archive ─────────────────────────────────────────────────────────────
    #[sea_orm(column_type = "Text", nullable)]
    pub zip_file_path: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub extracted_path: Option<String>,
    /// Entry points and manifests found at the archive root (JSON array).
    #[sea_orm(column_type = "Json")]
    pub main_files: serde_json::Value,
    /// Files worth previewing in the viewer (JSON array).
    #[sea_orm(column_type = "Json")]
    pub preview_files: serde_json::Value,

    // ─── Timestamps ──────────────────────────────────────────────────────────
    pub start_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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

impl Related<super::technology::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_technology::Relation::Technology.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::project_technology::Relation::Project.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Main files as plain strings.
    pub fn main_file_list(&self) -> Vec<String> {
        string_list(&self.main_files)
    }

    /// Preview files as plain strings.
    pub fn preview_file_list(&self) -> Vec<String> {
        string_list(&self.preview_files)
    }
}

fn string_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
