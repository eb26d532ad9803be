// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::io::Write;
use std::path::{Path, PathBuf};

use sqlx::SqlitePool;
use tempfile::TempDir;

use superheroes_db::{
    create_rivalry_table, create_scene_table, init_db_pool_with_path, run_migrations,
};

/// A file-backed database with the full schema, living in its own temp dir.
#[allow(dead_code)] // Not every test file uses every helper
pub struct TestDb {
    pub dir: TempDir,
    pub path: PathBuf,
    pub pool: SqlitePool,
}

/// Creates a database file with migrations applied and both on-demand tables.
#[allow(dead_code)]
pub async fn create_test_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("superheroes.db");
    let pool = init_db_pool_with_path(&path)
        .await
        .expect("Failed to open test database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    create_scene_table(&pool)
        .await
        .expect("Failed to create scene table");
    create_rivalry_table(&pool)
        .await
        .expect("Failed to create rivalry table");

    TestDb {
        dir,
        path,
        pool: pool.as_ref().clone(),
    }
}

/// Writes `contents` to `name` inside `dir` and returns its path.
#[allow(dead_code)]
pub fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create input file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write input file");
    path
}

/// Inserts the movies, heroes and villains the sample files refer to.
#[allow(dead_code)]
pub async fn seed_universe(pool: &SqlitePool) {
    for (id, title) in [(1, "Iron Man"), (2, "Thor"), (3, "The Avengers")] {
        sqlx::query("INSERT INTO movie (id, title) VALUES (?, ?)")
            .bind(id)
            .bind(title)
            .execute(pool)
            .await
            .expect("Failed to insert movie");
    }
    for (id, name) in [(1, "Iron Man"), (2, "Thor"), (3, "Hulk"), (4, "Black Widow")] {
        sqlx::query("INSERT INTO hero (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await
            .expect("Failed to insert hero");
    }
    for (id, name) in [(1, "Obadiah Stane"), (2, "Loki"), (3, "Malekith")] {
        sqlx::query("INSERT INTO villain (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await
            .expect("Failed to insert villain");
    }
}

/// Row count of `table`.
#[allow(dead_code)]
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
