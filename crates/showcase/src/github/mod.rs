//! GitHub API client for portfolio synchronization.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - REST payloads
//! - [`client`] - The [`GitHubApi`] seam and its Octocrab implementation
//! - [`convert`] - Technology and category derivation

pub mod client;
pub mod convert;
pub mod error;
pub mod types;

pub use client::{GitHubApi, GitHubClient, PAGE_SIZE, create_client};
pub use convert::{categorize_repository, technologies_for, technology_for_topic};
pub use error::{GitHubError, is_rate_limit_error};
pub use types::GitHubRepo;
