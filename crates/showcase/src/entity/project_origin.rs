//! Where a project record came from.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Origin of a project: synchronized from GitHub or uploaded as an archive.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ProjectOrigin {
    #[sea_orm(string_value = "github")]
    GitHub,
    #[sea_orm(string_value = "manual")]
    Manual,
}

impl std::fmt::Display for ProjectOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectOrigin::GitHub => write!(f, "github"),
            ProjectOrigin::Manual => write!(f, "manual"),
        }
    }
}
