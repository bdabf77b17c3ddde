//! Error envelope for the HTTP API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::ingest::IngestError;
use crate::projects::ProjectError;
use crate::repository::RepositoryError;
use crate::settings::SettingsError;
use crate::sync::SyncError;
use crate::viewer::ViewerError;

/// Errors returned by handlers, rendered as `{success: false, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unavailable(String),

    /// `message` is returned to the client; `detail` is logged and echoed as `error`.
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl ApiError {
    pub fn internal(message: impl Into<String>, detail: impl ToString) -> Self {
        Self::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Internal { message, detail } => {
                tracing::error!(error = %detail, "{message}");
                json!({ "success": false, "message": message, "error": detail })
            }
            other => {
                tracing::debug!(status = status.as_u16(), error = %other, "Request rejected");
                json!({ "success": false, "message": other.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            RepositoryError::InvalidInput { .. } => ApiError::BadRequest(err.to_string()),
            RepositoryError::Database(_) => ApiError::internal("Database error", err),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ProjectError::InvalidInput(message) => ApiError::BadRequest(message),
            ProjectError::Repository(err) => err.into(),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Validation(message) => ApiError::BadRequest(message),
            IngestError::NotFound(_) => ApiError::NotFound(err.to_string()),
            IngestError::NoArchive(_) => ApiError::BadRequest(err.to_string()),
            IngestError::Repository(err) => err.into(),
            IngestError::Settings(err) => err.into(),
            other => ApiError::internal("Project processing failed", other),
        }
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::OutOfRange { .. } => ApiError::BadRequest(err.to_string()),
            SettingsError::Repository(err) => err.into(),
        }
    }
}

impl From<ViewerError> for ApiError {
    fn from(err: ViewerError) -> Self {
        match err {
            ViewerError::NotExtracted | ViewerError::NoDemo => ApiError::NotFound(err.to_string()),
            ViewerError::Read { .. } => ApiError::internal("Cannot read project files", err),
        }
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        ApiError::internal("GitHub sync failed", err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::internal("Background task failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_statuses_follow_the_error_kind() {
        assert_eq!(
            ApiError::from(AuthError::NotAdmin).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(IngestError::validation("Only ZIP files are allowed")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ProjectError::NotFound(Uuid::nil())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(SettingsError::OutOfRange { value: 0 }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ViewerError::NotExtracted).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(RepositoryError::Database(sea_orm::DbErr::Custom("x".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = ApiError::from(IngestError::validation("File too large. Maximum size is 1MB"));
        assert_eq!(err.to_string(), "File too large. Maximum size is 1MB");
    }
}
