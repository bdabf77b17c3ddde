//! GitHub API error types.

use thiserror::Error;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    #[error("Cannot decode GitHub response: {0}")]
    Decode(String),
}

impl GitHubError {
    /// HTTP status reported by GitHub, if the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Api(octocrab::Error::GitHub { source, .. }) => {
                Some(source.status_code.as_u16())
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Whether an error indicates rate limiting (403/429).
pub fn is_rate_limit_error(e: &GitHubError) -> bool {
    matches!(e.status(), Some(403 | 429))
}
