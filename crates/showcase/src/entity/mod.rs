//! SeaORM entity definitions for the showcase database schema.

pub mod app_setting;
pub mod prelude;
pub mod project;
pub mod project_origin;
pub mod project_status;
pub mod project_technology;
pub mod technology;
pub mod technology_category;
