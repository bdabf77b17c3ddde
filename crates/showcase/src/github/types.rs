//! GitHub REST payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository fields used by the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl GitHubRepo {
    /// Owner login, taken from `full_name`.
    pub fn owner(&self) -> &str {
        self.full_name
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or(self.full_name.as_str())
    }
}

/// `GET /repos/{owner}/{repo}/readme`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReadmePayload {
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// `GET /repos/{owner}/{repo}/topics`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TopicsPayload {
    #[serde(default)]
    pub names: Vec<String>,
}

/// Query string for paginated listings.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ListParams {
    pub per_page: u8,
    pub page: u32,
    pub sort: &'static str,
}
