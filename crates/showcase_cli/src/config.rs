//! Configuration file support for showcase.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. Environment variables (prefixed with `SHOWCASE_`, sections separated by
//!    `__`, e.g. `SHOWCASE_GITHUB__TOKEN`)
//! 2. Local config file (`./showcase.toml`)
//! 3. XDG config file (`~/.config/showcase/config.toml`)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite://~/.local/state/showcase/showcase.db?mode=rwc"  # optional, this is the default
//!
//! [server]
//! bind = "0.0.0.0:3000"
//!
//! [storage]
//! uploads_dir = "/var/lib/showcase/uploads"
//!
//! [github]
//! username = "octocat"
//! token = "ghp_..."  # or use SHOWCASE_GITHUB__TOKEN
//!
//! [upload]
//! default_max_file_size_mb = 100
//!
//! [[auth.admin_tokens]]
//! token = "long-random-string"
//! user_id = "me"
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

const APP_NAME: &str = "showcase";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub github: GitHubConfig,
    pub upload: UploadConfig,
    pub auth: AuthConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL.
    /// Supports sqlite:// and postgres:// schemes.
    /// Defaults to `sqlite://~/.local/state/showcase/showcase.db?mode=rwc` if not specified.
    pub url: Option<String>,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Where uploaded archives and extracted trees live.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Defaults to `<data dir>/uploads`.
    pub uploads_dir: Option<PathBuf>,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Account whose repositories are synced. Sync is disabled when unset.
    pub username: Option<String>,
    /// API token. Unauthenticated requests are heavily rate limited.
    pub token: Option<String>,
}

/// Upload defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Used until an admin stores a limit through the settings endpoint.
    pub default_max_file_size_mb: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_max_file_size_mb: 100,
        }
    }
}

/// Static admin credentials.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub admin_tokens: Vec<AdminToken>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminToken {
    pub token: String,
    pub user_id: String,
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/showcase/config.toml)
    /// 3. Local config file (./showcase.toml)
    /// 4. Environment variables with SHOWCASE_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(config_path) = Self::default_config_path()
            && config_path.exists()
        {
            tracing::debug!("Loading config from {:?}", config_path);
            builder = builder.add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("showcase.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./showcase.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // SHOWCASE_GITHUB__TOKEN -> github.token
        builder = builder.add_source(Self::environment());

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    fn environment() -> Environment {
        Environment::with_prefix("SHOWCASE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The `mode=rwc` parameter creates the SQLite file if it doesn't exist.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("showcase.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// Get the uploads directory, falling back to the data directory.
    pub fn uploads_dir(&self) -> PathBuf {
        self.storage.uploads_dir.clone().unwrap_or_else(|| {
            Self::default_data_dir()
                .map(|dir| dir.join("uploads"))
                .unwrap_or_else(|| PathBuf::from("uploads"))
        })
    }

    /// Get the GitHub account to sync, ignoring blank values.
    pub fn github_username(&self) -> Option<&str> {
        self.github
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/showcase` or `~/.local/state/showcase`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| {
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}
