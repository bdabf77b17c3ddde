//! Common re-exports for convenient entity usage.

pub use super::app_setting::{
    ActiveModel as AppSettingActiveModel, Entity as AppSetting, Model as AppSettingModel,
};
pub use super::project::{
    ActiveModel as ProjectActiveModel, Column as ProjectColumn, Entity as Project,
    Model as ProjectModel,
};
pub use super::project_origin::ProjectOrigin;
pub use super::project_status::ProjectStatus;
pub use super::project_technology::{
    ActiveModel as ProjectTechnologyActiveModel, Column as ProjectTechnologyColumn,
    Entity as ProjectTechnology,
};
pub use super::technology::{
    ActiveModel as TechnologyActiveModel, Column as TechnologyColumn, Entity as Technology,
    Model as TechnologyModel,
};
pub use super::technology_category::TechnologyCategory;
