//! Base schema management.

use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;

/// Runs SQLx migrations located in the `migrations/` directory.
///
/// These create the tables the loaders depend on (`movie`, `real_person`,
/// `hero`, `villain`, `appearance`). `scene` and `rivalry` are not part of
/// the migrations; see [`crate::storage::schema`].
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    let migrations_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir.as_path()).await?;
    migrator.run(pool).await?;
    Ok(())
}
