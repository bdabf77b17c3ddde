//! Database connection utilities.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// Pragmas applied to file-backed SQLite databases.
///
/// WAL keeps the public listing readable while an upload transaction is
/// writing; `foreign_keys` makes the association table's cascades effective.
const SQLITE_PRAGMAS: &[&str] = &[
    "PRAGMA journal_mode=WAL",
    "PRAGMA busy_timeout=5000",
    "PRAGMA synchronous=NORMAL",
    "PRAGMA foreign_keys=ON",
];

async fn configure_sqlite(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    for pragma in SQLITE_PRAGMAS {
        db.execute(Statement::from_string(backend, pragma.to_string()))
            .await?;
    }
    Ok(())
}

/// Establish a connection to the database.
///
/// # Arguments
/// * `database_url` - e.g. `sqlite:///var/lib/showcase/showcase.db?mode=rwc` or `postgres:///showcase`
///
/// # Errors
/// Returns `DbErr` if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    if database_url.starts_with("sqlite://") {
        configure_sqlite(&db).await?;
    }

    Ok(db)
}

/// Connect and bring the schema up to date.
///
/// ```ignore
/// let db = showcase::connect_and_migrate("sqlite::memory:").await?;
/// ```
#[cfg(feature = "migrate")]
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    use sea_orm_migration::MigratorTrait;

    let db = connect(database_url).await?;
    crate::migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_configure_sqlite_runs_every_pragma() {
        let results = SQLITE_PRAGMAS.iter().map(|_| MockExecResult {
            rows_affected: 0,
            last_insert_id: 0,
        });
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results(results)
            .into_connection();

        configure_sqlite(&db)
            .await
            .expect("mock sqlite pragma execs should succeed");

        let log = db.into_transaction_log();
        assert_eq!(log.len(), SQLITE_PRAGMAS.len());
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let err = connect("ftp://nowhere")
            .await
            .expect_err("unsupported URL should error");
        assert!(!err.to_string().is_empty());
    }

    #[cfg(all(feature = "sqlite", feature = "migrate"))]
    #[tokio::test]
    async fn test_in_memory_database_migrates() {
        use sea_orm::EntityTrait;

        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("in-memory db should migrate");
        let projects = crate::entity::project::Entity::find()
            .all(&db)
            .await
            .expect("projects table exists");
        assert!(projects.is_empty());
    }
}
