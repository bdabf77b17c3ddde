//! Runtime-editable upload settings, persisted in `app_settings`.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AdminSession;
use crate::repository::{self, RepositoryError};

/// Settings key holding the upload limit in megabytes.
pub const MAX_FILE_SIZE_MB_KEY: &str = "upload.max_file_size_mb";

/// Smallest accepted limit, in MB.
pub const MIN_FILE_SIZE_MB: i64 = 1;

/// Largest accepted limit, in MB.
pub const MAX_FILE_SIZE_MB: i64 = 1000;

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Maximum file size must be between {MIN_FILE_SIZE_MB} and {MAX_FILE_SIZE_MB} MB, got {value}")]
    OutOfRange { value: i64 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The effective upload limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadSettings {
    /// Limit in bytes.
    #[serde(rename = "maxFileSize")]
    pub max_file_size: u64,
    #[serde(rename = "maxFileSizeMB")]
    pub max_file_size_mb: u64,
}

impl UploadSettings {
    pub fn from_mb(mb: u64) -> Self {
        Self {
            max_file_size: mb * BYTES_PER_MB,
            max_file_size_mb: mb,
        }
    }
}

fn validate(mb: i64) -> Result<u64, SettingsError> {
    if (MIN_FILE_SIZE_MB..=MAX_FILE_SIZE_MB).contains(&mb) {
        Ok(mb as u64)
    } else {
        Err(SettingsError::OutOfRange { value: mb })
    }
}

/// Pull a configured fallback limit into the accepted range.
fn clamp_default(default_mb: u64) -> u64 {
    let clamped = default_mb.clamp(MIN_FILE_SIZE_MB as u64, MAX_FILE_SIZE_MB as u64);
    if clamped != default_mb {
        tracing::warn!(
            configured = default_mb,
            effective = clamped,
            "Default upload limit is out of range"
        );
    }
    clamped
}

/// Current upload settings, falling back to `default_mb` when nothing valid
/// is stored. The fallback is clamped to the accepted range.
pub async fn load<C: ConnectionTrait>(
    db: &C,
    default_mb: u64,
) -> Result<UploadSettings, SettingsError> {
    let default_mb = clamp_default(default_mb);
    let stored = repository::get_setting(db, MAX_FILE_SIZE_MB_KEY).await?;
    let mb = match stored.as_deref().map(str::parse::<i64>) {
        Some(Ok(value)) => match validate(value) {
            Ok(mb) => mb,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring stored upload limit");
                default_mb
            }
        },
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Stored upload limit is not a number");
            default_mb
        }
        None => default_mb,
    };
    Ok(UploadSettings::from_mb(mb))
}

/// Validate and persist a new upload limit.
pub async fn update<C: ConnectionTrait>(
    admin: &AdminSession,
    db: &C,
    mb: i64,
) -> Result<UploadSettings, SettingsError> {
    let mb = validate(mb)?;
    repository::put_setting(db, MAX_FILE_SIZE_MB_KEY, &mb.to_string()).await?;
    tracing::info!(user = admin.user_id(), max_file_size_mb = mb, "Upload limit updated");
    Ok(UploadSettings::from_mb(mb))
}
