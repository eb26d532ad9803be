//! Creation of the `scene` and `rivalry` tables.
//!
//! Both depend on tables from the base migrations (`movie`, `hero`, `villain`)
//! and are only created when absent.

use log::{debug, info};
use sqlx::SqlitePool;

use crate::config::Table;
use crate::error_handling::{DatabaseError, SqlDiagnostic};

const CREATE_SCENE: &str = "CREATE TABLE scene (
    movie_id INTEGER NOT NULL,
    order_number INTEGER NOT NULL,
    title TEXT NOT NULL,
    duration INTEGER NOT NULL,
    PRIMARY KEY (movie_id, order_number),
    FOREIGN KEY (movie_id) REFERENCES movie(id) ON UPDATE CASCADE ON DELETE CASCADE
)";

const CREATE_RIVALRY: &str = "CREATE TABLE rivalry (
    hero_id INTEGER NOT NULL,
    villain_id INTEGER NOT NULL,
    first_encounter DATE,
    PRIMARY KEY (hero_id, villain_id),
    FOREIGN KEY (hero_id) REFERENCES hero(id) ON UPDATE CASCADE ON DELETE CASCADE,
    FOREIGN KEY (villain_id) REFERENCES villain(id) ON UPDATE CASCADE ON DELETE CASCADE
)";

/// Whether `table` exists in the database.
pub async fn table_exists(pool: &SqlitePool, table: Table) -> Result<bool, DatabaseError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table.as_ref())
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("{}", SqlDiagnostic::from(&e));
                DatabaseError::SqlError(e)
            })?;
    Ok(count > 0)
}

/// Creates the `scene` table.
///
/// Returns `Ok(false)` without touching the schema if it already exists.
pub async fn create_scene_table(pool: &SqlitePool) -> Result<bool, DatabaseError> {
    create_table(pool, Table::Scene, CREATE_SCENE).await
}

/// Creates the `rivalry` table.
///
/// Returns `Ok(false)` without touching the schema if it already exists.
pub async fn create_rivalry_table(pool: &SqlitePool) -> Result<bool, DatabaseError> {
    create_table(pool, Table::Rivalry, CREATE_RIVALRY).await
}

async fn create_table(pool: &SqlitePool, table: Table, ddl: &str) -> Result<bool, DatabaseError> {
    if table_exists(pool, table).await? {
        debug!("Table {} already exists", table);
        return Ok(false);
    }

    sqlx::query(ddl).execute(pool).await.map_err(|e| {
        log::error!("{}", SqlDiagnostic::from(&e));
        DatabaseError::SqlError(e)
    })?;
    info!("Created table {}", table);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool_without_tables;

    #[tokio::test]
    async fn test_base_tables_exist_after_migrations() {
        let pool = create_test_pool_without_tables().await;
        for table in [
            Table::Movie,
            Table::RealPerson,
            Table::Hero,
            Table::Villain,
            Table::Appearance,
        ] {
            assert!(table_exists(&pool, table).await.unwrap(), "{table} missing");
        }
        assert!(!table_exists(&pool, Table::Scene).await.unwrap());
        assert!(!table_exists(&pool, Table::Rivalry).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_tables_once() {
        let pool = create_test_pool_without_tables().await;

        assert!(create_scene_table(&pool).await.unwrap());
        assert!(create_rivalry_table(&pool).await.unwrap());
        assert!(table_exists(&pool, Table::Scene).await.unwrap());
        assert!(table_exists(&pool, Table::Rivalry).await.unwrap());

        // Second attempt is a no-op
        assert!(!create_scene_table(&pool).await.unwrap());
        assert!(!create_rivalry_table(&pool).await.unwrap());
    }

    #[tokio::test]
    async fn test_rivalry_rejects_duplicate_pair() {
        let pool = create_test_pool_without_tables().await;
        create_rivalry_table(&pool).await.unwrap();
        sqlx::query("INSERT INTO hero (id, name) VALUES (1, 'Iron Man')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO villain (id, name) VALUES (1, 'Obadiah Stane')")
            .execute(&pool)
            .await
            .unwrap();

        let insert = "INSERT INTO rivalry (hero_id, villain_id) VALUES (1, 1)";
        sqlx::query(insert).execute(&pool).await.unwrap();
        let err = sqlx::query(insert).execute(&pool).await.unwrap_err();
        assert_eq!(SqlDiagnostic::from(&err).state, "unique_violation");
    }
}
