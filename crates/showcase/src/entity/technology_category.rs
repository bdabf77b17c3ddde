//! Technology category enum.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Coarse grouping used to render the technology cloud and to template
/// generated project descriptions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum TechnologyCategory {
    #[sea_orm(string_value = "frontend")]
    Frontend,
    #[sea_orm(string_value = "backend")]
    Backend,
    #[sea_orm(string_value = "database")]
    Database,
    #[sea_orm(string_value = "tool")]
    Tool,
    #[sea_orm(string_value = "cloud")]
    Cloud,
    #[sea_orm(string_value = "language")]
    Language,
    #[sea_orm(string_value = "mobile")]
    Mobile,
    #[sea_orm(string_value = "other")]
    Other,
}

impl std::fmt::Display for TechnologyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TechnologyCategory::Frontend => "frontend",
            TechnologyCategory::Backend => "backend",
            TechnologyCategory::Database => "database",
            TechnologyCategory::Tool => "tool",
            TechnologyCategory::Cloud => "cloud",
            TechnologyCategory::Language => "language",
            TechnologyCategory::Mobile => "mobile",
            TechnologyCategory::Other => "other",
        };
        f.write_str(label)
    }
}
