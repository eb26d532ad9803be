//! Shared test helpers for storage and loader tests.
//!
//! This module provides common utilities for database setup and test data creation.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::storage::run_migrations;
use crate::storage::schema::{create_rivalry_table, create_scene_table};

/// Creates an in-memory pool with the base migrations applied, but without
/// the `scene` and `rivalry` tables.
///
/// One connection that never expires: an in-memory database lives exactly as
/// long as its connection.
pub async fn create_test_pool_without_tables() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse in-memory URL")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates an in-memory pool with the full schema.
pub async fn create_test_pool() -> SqlitePool {
    let pool = create_test_pool_without_tables().await;
    create_scene_table(&pool)
        .await
        .expect("Failed to create scene table");
    create_rivalry_table(&pool)
        .await
        .expect("Failed to create rivalry table");
    pool
}

/// Inserts `(id, title)` movies.
pub async fn seed_movies(pool: &SqlitePool, movies: &[(i32, &str)]) {
    for (id, title) in movies {
        sqlx::query("INSERT INTO movie (id, title) VALUES (?, ?)")
            .bind(*id)
            .bind(*title)
            .execute(pool)
            .await
            .expect("Failed to insert test movie");
    }
}

/// Inserts `(id, name)` heroes.
pub async fn seed_heroes(pool: &SqlitePool, heroes: &[(i32, &str)]) {
    for (id, name) in heroes {
        sqlx::query("INSERT INTO hero (id, name) VALUES (?, ?)")
            .bind(*id)
            .bind(*name)
            .execute(pool)
            .await
            .expect("Failed to insert test hero");
    }
}

/// Inserts `(id, name)` villains.
pub async fn seed_villains(pool: &SqlitePool, villains: &[(i32, &str)]) {
    for (id, name) in villains {
        sqlx::query("INSERT INTO villain (id, name) VALUES (?, ?)")
            .bind(*id)
            .bind(*name)
            .execute(pool)
            .await
            .expect("Failed to insert test villain");
    }
}

/// Row count of `table`.
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
