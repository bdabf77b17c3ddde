use console::style;
use showcase::AdminSession;
use showcase::ingest::{IngestConfig, Ingestor, ReanalysisStatus};

use crate::config::Config;

pub(crate) async fn handle_reanalyze(
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = showcase::connect_and_migrate(database_url).await?;
    let ingestor = Ingestor::new(
        db,
        IngestConfig {
            uploads_dir: config.uploads_dir(),
            default_max_file_size_mb: config.upload.default_max_file_size_mb,
        },
    );

    // Local runs act as the system admin.
    let report = ingestor.reanalyze_all(&AdminSession::system()).await?;

    for entry in &report.results {
        match entry.status {
            ReanalysisStatus::Success => println!(
                "  {} {}: {}",
                style("✓").green(),
                entry.title,
                entry
                    .technologies
                    .as_deref()
                    .map(|names| names.join(", "))
                    .unwrap_or_default()
            ),
            ReanalysisStatus::Error => println!(
                "  {} {}: {}",
                style("✗").red(),
                entry.title,
                entry.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    println!(
        "{} {} projects: {} succeeded, {} failed",
        style("Re-analyzed").bold(),
        report.total,
        report.succeeded,
        report.failed
    );
    Ok(())
}
