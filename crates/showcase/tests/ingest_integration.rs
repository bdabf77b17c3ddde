//! Integration tests for archive ingestion and re-analysis.
//!
//! These tests require the `sqlite` and `migrate` features to be enabled
//! and use an in-memory SQLite database plus a temporary uploads directory.

#![cfg(all(feature = "sqlite", feature = "migrate"))]

use std::io::{Cursor, Write};
use std::path::Path;

use sea_orm::DatabaseConnection;
use showcase::entity::project_origin::ProjectOrigin;
use showcase::ingest::{IngestConfig, IngestError, Ingestor, ReanalysisStatus, UploadedFile};
use showcase::{AdminSession, connect_and_migrate, projects, repository, settings};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const PACKAGE_JSON: &str = r#"{
  "name": "todo-app",
  "dependencies": { "next": "14.1.0", "react": "18.2.0" }
}"#;

const APP_TSX: &str = "export default function App() { return <main>Todo</main>; }";

/// Create an in-memory SQLite database with migrations applied.
async fn setup_test_db() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

async fn setup_ingestor() -> (Ingestor, DatabaseConnection, TempDir) {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().expect("tempdir");
    let ingestor = Ingestor::new(
        db.clone(),
        IngestConfig {
            uploads_dir: uploads.path().to_path_buf(),
            default_max_file_size_mb: 100,
        },
    );
    (ingestor, db, uploads)
}

/// Build a ZIP archive in memory.
fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, body) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(body.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish archive").into_inner()
}

fn react_app() -> Vec<u8> {
    zip_bytes(&[
        ("package.json", PACKAGE_JSON),
        ("src/App.tsx", APP_TSX),
        ("README.md", "# Todo app\n\nTracks things to do."),
    ])
}

fn admin() -> AdminSession {
    AdminSession::system()
}

async fn technology_names(db: &DatabaseConnection, project_id: uuid::Uuid) -> Vec<String> {
    let mut names: Vec<String> = repository::technologies_for_project(db, project_id)
        .await
        .expect("technologies")
        .into_iter()
        .map(|t| t.name)
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_upload_creates_analyzed_project() {
    let (ingestor, db, uploads) = setup_ingestor().await;

    let outcome = ingestor
        .ingest(&admin(), UploadedFile::new("todo_app.zip", None, react_app()))
        .await
        .expect("upload should succeed");

    let project = &outcome.project;
    assert_eq!(project.title, "todo app");
    assert_eq!(project.origin, ProjectOrigin::Manual);
    assert_eq!(project.category, "personal");
    assert!(!project.featured);
    assert!(outcome.analysis_error.is_none());
    assert_eq!(project.content.as_deref(), Some("# Todo app\n\nTracks things to do."));

    let stored = project.zip_file_path.as_deref().expect("archive path");
    assert!(Path::new(stored).is_file());
    assert!(stored.ends_with("_todo_app.zip"));

    let extracted = project.extracted_path.as_deref().expect("extracted path");
    assert_eq!(Path::new(extracted), ingestor.extracted_dir(project.id));
    assert!(Path::new(extracted).join("src/App.tsx").is_file());
    assert!(Path::new(extracted).starts_with(uploads.path()));

    let names = technology_names(&db, project.id).await;
    assert!(names.contains(&"React".to_string()), "got {names:?}");
    assert_eq!(outcome.technologies.len(), names.len());
}

#[tokio::test]
async fn test_broken_archive_degrades_to_minimal_project() {
    let (ingestor, db, _uploads) = setup_ingestor().await;

    let outcome = ingestor
        .ingest(
            &admin(),
            UploadedFile::new("broken.zip", None, b"this is not a zip archive".to_vec()),
        )
        .await
        .expect("a broken archive must not fail the upload");

    assert_eq!(outcome.project.title, "broken");
    assert!(
        outcome
            .project
            .description
            .as_deref()
            .is_some_and(|d| d.contains("broken.zip"))
    );
    assert!(outcome.technologies.is_empty());
    assert!(outcome.analysis_error.is_some());
    assert!(outcome.project.extracted_path.is_none());

    let details = projects::get(&db, outcome.project.id)
        .await
        .expect("project is persisted");
    assert!(details.technologies.is_empty());
    assert!(details.project.zip_file_path.is_some());
}

#[tokio::test]
async fn test_upload_size_limit_is_inclusive() {
    let (ingestor, db, _uploads) = setup_ingestor().await;
    settings::update(&admin(), &db, 1).await.expect("set limit");

    let limit = 1024 * 1024;
    ingestor
        .ingest(&admin(), UploadedFile::new("exact.zip", None, vec![0; limit]))
        .await
        .expect("exactly the limit is accepted");

    let err = ingestor
        .ingest(&admin(), UploadedFile::new("over.zip", None, vec![0; limit + 1]))
        .await
        .expect_err("one byte over is rejected");
    assert!(matches!(err, IngestError::Validation(_)));
    assert_eq!(err.to_string(), "File too large. Maximum size is 1MB");
}

#[tokio::test]
async fn test_non_zip_upload_is_rejected_before_storage() {
    let (ingestor, db, uploads) = setup_ingestor().await;

    let err = ingestor
        .ingest(
            &admin(),
            UploadedFile::new("notes.txt", Some("text/plain".to_string()), b"hi".to_vec()),
        )
        .await
        .expect_err("non-zip should be rejected");

    assert_eq!(err.to_string(), "Only ZIP files are allowed");
    let stored = std::fs::read_dir(uploads.path()).expect("uploads dir").count();
    assert_eq!(stored, 0);
    let projects = projects::list(&db, &Default::default()).await.expect("list");
    assert!(projects.is_empty());
}

#[tokio::test]
async fn test_reanalysis_is_idempotent() {
    let (ingestor, db, _uploads) = setup_ingestor().await;
    let outcome = ingestor
        .ingest(&admin(), UploadedFile::new("todo_app.zip", None, react_app()))
        .await
        .expect("upload");
    let id = outcome.project.id;

    let before = technology_names(&db, id).await;
    let technologies_before = repository::count_technologies(&db).await.expect("count");

    let first = ingestor.reanalyze(&admin(), id).await.expect("first run");
    let second = ingestor.reanalyze(&admin(), id).await.expect("second run");

    assert_eq!(first.status, ReanalysisStatus::Success);
    assert_eq!(first.technologies, second.technologies);
    assert_eq!(first.description, second.description);
    assert_eq!(technology_names(&db, id).await, before);
    assert_eq!(
        repository::count_technologies(&db).await.expect("count"),
        technologies_before
    );

    let project = projects::get(&db, id).await.expect("project").project;
    assert_eq!(project.description, second.description);
    assert_eq!(
        project.extracted_path.as_deref().map(Path::new),
        Some(ingestor.extracted_dir(id).as_path())
    );
}

#[tokio::test]
async fn test_reanalysis_recovers_a_previously_failed_analysis() {
    let (ingestor, db, _uploads) = setup_ingestor().await;
    let outcome = ingestor
        .ingest(&admin(), UploadedFile::new("later.zip", None, b"garbage".to_vec()))
        .await
        .expect("upload");
    let stored = outcome.project.zip_file_path.clone().expect("archive path");

    // Replace the stored archive with a valid one and analyze again.
    std::fs::write(&stored, react_app()).expect("rewrite archive");
    let entry = ingestor
        .reanalyze(&admin(), outcome.project.id)
        .await
        .expect("reanalyze");

    assert_eq!(entry.status, ReanalysisStatus::Success);
    let names = technology_names(&db, outcome.project.id).await;
    assert!(names.contains(&"React".to_string()));
}

#[tokio::test]
async fn test_reanalyze_unknown_project_is_not_found() {
    let (ingestor, _db, _uploads) = setup_ingestor().await;
    let id = uuid::Uuid::new_v4();
    let err = ingestor.reanalyze(&admin(), id).await.expect_err("unknown id");
    assert!(matches!(err, IngestError::NotFound(found) if found == id));
}

#[tokio::test]
async fn test_reanalyze_all_isolates_failures() {
    let (ingestor, _db, _uploads) = setup_ingestor().await;

    let good = ingestor
        .ingest(&admin(), UploadedFile::new("good.zip", None, react_app()))
        .await
        .expect("good upload");
    let missing = ingestor
        .ingest(&admin(), UploadedFile::new("missing.zip", None, react_app()))
        .await
        .expect("second upload");
    let stored = missing.project.zip_file_path.clone().expect("archive path");
    std::fs::remove_file(stored).expect("remove archive");

    let report = ingestor.reanalyze_all(&admin()).await.expect("report");

    assert_eq!(report.total, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);

    let ok = report
        .results
        .iter()
        .find(|r| r.id == good.project.id)
        .expect("good entry");
    assert_eq!(ok.status, ReanalysisStatus::Success);
    assert!(ok.error.is_none());

    let failed = report
        .results
        .iter()
        .find(|r| r.id == missing.project.id)
        .expect("failed entry");
    assert_eq!(failed.status, ReanalysisStatus::Error);
    assert_eq!(failed.title, "missing");
    assert!(failed.error.is_some());
    assert!(failed.technologies.is_none());
}

#[tokio::test]
async fn test_concurrent_uploads_use_separate_directories() {
    let (ingestor, _db, _uploads) = setup_ingestor().await;

    let (a, b) = tokio::join!(
        ingestor.ingest(&admin(), UploadedFile::new("first.zip", None, react_app())),
        ingestor.ingest(&admin(), UploadedFile::new("second.zip", None, react_app())),
    );
    let (a, b) = (a.expect("first"), b.expect("second"));

    assert_ne!(a.project.id, b.project.id);
    assert_ne!(a.project.extracted_path, b.project.extracted_path);
}
