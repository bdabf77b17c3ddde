//! Showcase - a portfolio back-office core.
//!
//! Projects enter the portfolio two ways: as uploaded ZIP archives, which are
//! extracted and analyzed for technologies, or as repositories synchronized
//! from a GitHub account. Both end up in the same project/technology model.
//!
//! # Features
//!
//! - `sqlite` / `postgres` - Database backends.
//! - `migrate` - Enables [`connect_and_migrate`] and the bundled migrations.
//! - `github` - The octocrab-backed GitHub client and the synchronizer.
//! - `server` - The axum HTTP API.
//!
//! # Example
//!
//! ```ignore
//! use showcase::{connect_and_migrate, AdminSession, ingest::{IngestConfig, Ingestor, UploadedFile}};
//!
//! let db = connect_and_migrate("sqlite://showcase.db?mode=rwc").await?;
//! let ingestor = Ingestor::new(db, IngestConfig {
//!     uploads_dir: "uploads".into(),
//!     default_max_file_size_mb: 100,
//! });
//!
//! let file = UploadedFile::new("todo_app.zip", None, std::fs::read("todo_app.zip")?);
//! let outcome = ingestor.ingest(&AdminSession::system(), file).await?;
//! println!("{} uses {} technologies", outcome.project.title, outcome.technologies.len());
//! ```

pub mod analysis;
pub mod archive;
pub mod auth;
pub mod db;
pub mod entity;
pub mod ingest;
pub mod projects;
pub mod repository;
pub mod settings;
pub mod taxonomy;
pub mod viewer;

#[cfg(feature = "github")]
pub mod github;

#[cfg(feature = "github")]
pub mod retry;

#[cfg(feature = "github")]
pub mod sync;

#[cfg(feature = "server")]
pub mod api;

#[cfg(feature = "migrate")]
pub mod migration;

pub use auth::{AdminSession, AuthError, Role, Session, SessionProvider, StaticTokenSessions};
pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use repository::RepositoryError;
