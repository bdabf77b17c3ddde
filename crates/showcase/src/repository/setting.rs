use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entity::app_setting::{ActiveModel, Entity as AppSetting, Model};

use super::errors::{RepositoryError, Result};

/// Read a setting value by key.
pub async fn get<C: ConnectionTrait>(db: &C, key: &str) -> Result<Option<String>> {
    let row = AppSetting::find_by_id(key.to_string()).one(db).await?;
    Ok(row.map(|setting| setting.value))
}

/// Insert or overwrite a setting.
pub async fn put<C: ConnectionTrait>(db: &C, key: &str, value: &str) -> Result<Model> {
    let now = Utc::now().fixed_offset();
    let existing = AppSetting::find_by_id(key.to_string()).one(db).await?;

    match existing {
        Some(existing) => {
            let mut model: ActiveModel = existing.into();
            model.value = Set(value.to_string());
            model.updated_at = Set(now);
            model.update(db).await.map_err(RepositoryError::from)
        }
        None => ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .map_err(RepositoryError::from),
    }
}
