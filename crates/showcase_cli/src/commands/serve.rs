use std::sync::Arc;

use showcase::StaticTokenSessions;
use showcase::api::{self, AppState, GitHubSource};
use showcase::ingest::{IngestConfig, Ingestor};

use crate::commands::sync::github_source;
use crate::config::Config;
use crate::shutdown;

pub(crate) async fn handle_serve(
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = showcase::connect_and_migrate(database_url).await?;

    let uploads_dir = config.uploads_dir();
    tokio::fs::create_dir_all(&uploads_dir).await?;

    let sessions = StaticTokenSessions::admins(
        config
            .auth
            .admin_tokens
            .iter()
            .map(|t| (t.token.clone(), t.user_id.clone())),
    );
    if sessions.is_empty() {
        tracing::warn!("No admin tokens configured; every admin route will answer 401");
    }

    let github = github_source(config)?.map(|(api, owner)| GitHubSource { api, owner });
    if github.is_none() {
        tracing::info!("No GitHub account configured; sync is disabled");
    }

    let state = AppState {
        ingestor: Ingestor::new(
            db.clone(),
            IngestConfig {
                uploads_dir: uploads_dir.clone(),
                default_max_file_size_mb: config.upload.default_max_file_size_mb,
            },
        ),
        db,
        sessions: Arc::new(sessions),
        github,
    };

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        uploads = %uploads_dir.display(),
        "Listening"
    );

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
