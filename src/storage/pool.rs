//! Database session management.
//!
//! This module opens the SQLite store with:
//! - Exactly one connection, so every operation runs on the same session
//! - Foreign keys enforced
//! - WAL journal mode
//! - Automatic database file creation

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::error_handling::{DatabaseError, SqlDiagnostic};

/// Shared handle to the single-connection pool.
pub type DbPool = Arc<Pool<Sqlite>>;

/// Opens the database at `db_path`, creating the file if it doesn't exist.
///
/// The pool holds a single connection. A loader that keeps a transaction open
/// owns the session until it finishes; nothing else can interleave.
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<DbPool, DatabaseError> {
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(db_path)
    {
        Ok(_) => info!("Database file created successfully."),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            info!("Database file already exists.")
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", SqlDiagnostic::from(&e));
            DatabaseError::SqlError(e)
        })?;

    Ok(Arc::new(pool))
}

/// Closes the session. Waits for the connection to be returned first.
pub async fn close_pool(pool: &SqlitePool) {
    pool.close().await;
    info!("Database connection closed.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_file_and_enforces_foreign_keys() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("heroes.db");

        let pool = init_db_pool_with_path(&db_path)
            .await
            .expect("Failed to open database");
        assert!(db_path.exists());

        let fk: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(pool.as_ref())
            .await
            .unwrap();
        assert_eq!(fk, 1);

        close_pool(&pool).await;
        assert!(pool.is_closed());
    }

    #[tokio::test]
    async fn test_init_reopens_existing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("heroes.db");

        let first = init_db_pool_with_path(&db_path).await.unwrap();
        sqlx::query("CREATE TABLE marker (id INTEGER)")
            .execute(first.as_ref())
            .await
            .unwrap();
        close_pool(&first).await;

        let second = init_db_pool_with_path(&db_path).await.unwrap();
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='marker'",
        )
        .fetch_one(second.as_ref())
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_init_fails_for_missing_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("missing").join("heroes.db");

        let result = init_db_pool_with_path(&db_path).await;
        assert!(matches!(result, Err(DatabaseError::FileCreationError(_))));
    }
}
