//! GitHub portfolio synchronization.
//!
//! # Module Structure
//!
//! - [`types`] - Report types: `SyncReport`, `RepoSyncDetail`
//! - [`engine`] - The sync run: [`sync_all`]
//!
//! # Example
//!
//! ```ignore
//! use showcase::github::GitHubClient;
//! use showcase::sync::sync_all;
//!
//! let client = GitHubClient::new(Some(&token))?;
//! let report = sync_all(&db, &client, "octocat").await?;
//! println!("{} created, {} updated", report.created, report.updated);
//! ```

pub mod engine;
mod types;

pub use engine::{SyncError, sync_all};
pub use types::{RepoSyncDetail, RepoSyncStatus, SyncReport};
