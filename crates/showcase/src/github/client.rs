//! GitHub API access.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use octocrab::Octocrab;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{GitHubError, is_rate_limit_error};
use super::types::{GitHubRepo, ListParams, ReadmePayload, TopicsPayload};
use crate::retry::{RetryConfig, with_retry};

/// Repositories requested per page.
pub const PAGE_SIZE: u8 = 100;

/// The GitHub operations the synchronizer depends on.
///
/// `full_name` is always `owner/repo`.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Every repository of `owner`, most recently updated first.
    async fn list_repositories(&self, owner: &str) -> Result<Vec<GitHubRepo>, GitHubError>;

    async fn get_repository(&self, full_name: &str) -> Result<GitHubRepo, GitHubError>;

    /// Language names ordered by byte count, largest first.
    async fn list_languages(&self, full_name: &str) -> Result<Vec<String>, GitHubError>;

    async fn list_topics(&self, full_name: &str) -> Result<Vec<String>, GitHubError>;

    /// Decoded README text, `None` when the repository has none.
    async fn get_readme(&self, full_name: &str) -> Result<Option<String>, GitHubError>;
}

/// Create an Octocrab instance, authenticated when a token is given.
pub fn create_client(token: Option<&str>) -> Result<Octocrab, GitHubError> {
    let builder = Octocrab::builder();
    let builder = match token {
        Some(token) if !token.trim().is_empty() => builder.personal_token(token.trim().to_string()),
        _ => {
            tracing::warn!("No GitHub token configured; API calls are rate limited");
            builder
        }
    };
    builder.build().map_err(GitHubError::Api)
}

/// [`GitHubApi`] backed by Octocrab, retrying rate-limited requests.
#[derive(Clone)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    retry: RetryConfig,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self, GitHubError> {
        Ok(Self::from_octocrab(create_client(token)?))
    }

    pub fn from_octocrab(client: Octocrab) -> Self {
        Self {
            inner: Arc::new(client),
            retry: RetryConfig::default(),
        }
    }

    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn inner(&self) -> &Octocrab {
        &self.inner
    }

    async fn get_json<T, P>(&self, route: &str, params: Option<&P>) -> Result<T, GitHubError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized + Sync,
    {
        with_retry(
            || async { self.inner.get(route, params).await.map_err(GitHubError::Api) },
            is_rate_limit_error,
            self.retry.clone(),
            route,
        )
        .await
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_repositories(&self, owner: &str) -> Result<Vec<GitHubRepo>, GitHubError> {
        let route = format!("/users/{owner}/repos");
        let mut all_repos = Vec::new();
        let mut page = 1u32;

        loop {
            let params = ListParams {
                per_page: PAGE_SIZE,
                page,
                sort: "updated",
            };
            let repos: Vec<GitHubRepo> = self.get_json(&route, Some(&params)).await?;
            let count = repos.len();
            all_repos.extend(repos);

            tracing::debug!(owner, page, count, total = all_repos.len(), "Fetched repository page");

            // A short page is the last one.
            if count < PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        Ok(all_repos)
    }

    async fn get_repository(&self, full_name: &str) -> Result<GitHubRepo, GitHubError> {
        self.get_json(&format!("/repos/{full_name}"), None::<&()>)
            .await
    }

    async fn list_languages(&self, full_name: &str) -> Result<Vec<String>, GitHubError> {
        let bytes: HashMap<String, u64> = self
            .get_json(&format!("/repos/{full_name}/languages"), None::<&()>)
            .await?;
        Ok(rank_languages(bytes))
    }

    async fn list_topics(&self, full_name: &str) -> Result<Vec<String>, GitHubError> {
        let topics: TopicsPayload = self
            .get_json(&format!("/repos/{full_name}/topics"), None::<&()>)
            .await?;
        Ok(topics.names)
    }

    async fn get_readme(&self, full_name: &str) -> Result<Option<String>, GitHubError> {
        let payload: ReadmePayload = match self
            .get_json(&format!("/repos/{full_name}/readme"), None::<&()>)
            .await
        {
            Ok(payload) => payload,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        decode_readme(payload).map(Some)
    }
}

/// Language names ordered by byte count descending, then by name.
pub(crate) fn rank_languages(bytes: HashMap<String, u64>) -> Vec<String> {
    let mut ranked: Vec<(String, u64)> = bytes.into_iter().collect();
    ranked.sort_by(|(a_name, a_bytes), (b_name, b_bytes)| {
        b_bytes.cmp(a_bytes).then_with(|| a_name.cmp(b_name))
    });
    ranked.into_iter().map(|(name, _)| name).collect()
}

fn decode_readme(payload: ReadmePayload) -> Result<String, GitHubError> {
    match payload.encoding.as_deref() {
        Some("base64") => {
            // GitHub wraps the payload at 60 columns.
            let compact: String = payload
                .content
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            let raw = STANDARD
                .decode(compact)
                .map_err(|e| GitHubError::Decode(e.to_string()))?;
            String::from_utf8(raw).map_err(|e| GitHubError::Decode(e.to_string()))
        }
        _ => Ok(payload.content),
    }
}
