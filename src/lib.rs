//! superheroes_db library: loading and querying a superheroes SQLite database
//!
//! The database models heroes, villains, movies, their scenes and the
//! rivalries between heroes and villains. This library provides:
//!
//! - Schema creation for the `scene` and `rivalry` tables
//! - Two bulk loaders for `;`-delimited text files:
//!   - [`load_scenes`]: best effort, one autocommitted insert per line
//!   - [`load_appearances`]: all or nothing, appearances plus the distinct
//!     rivalries they imply, in a single transaction
//! - Read queries rendering titles as `{a, b, c}` lists
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use superheroes_db::{init_db_pool_with_path, load_appearances, run_migrations};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = init_db_pool_with_path(Path::new("superheroes.db")).await?;
//! run_migrations(&pool).await?;
//! superheroes_db::create_rivalry_table(&pool).await?;
//!
//! let outcome = load_appearances(&pool, Path::new("appearances.txt")).await?;
//! if outcome.is_committed() {
//!     println!("{} rows written", outcome.rows_affected());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. The pool holds a single connection;
//! run one operation at a time.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod loader;
pub mod queries;
pub mod record;
pub mod storage;

// Re-export public API
pub use config::{Cli, Command, Config, LogFormat, LogLevel};
pub use error_handling::{LoadError, TransactionAbort};
pub use loader::{load_appearances, load_scenes, LoadReport, TransactionOutcome};
pub use queries::{catalog, movie_duration, scenes_for_villain, TitleList};
pub use run::run_command;
pub use storage::{
    close_pool, create_rivalry_table, create_scene_table, init_db_pool_with_path, run_migrations,
    table_exists,
};

// Command dispatch shared by the binary and the integration tests
mod run {
    use anyhow::{bail, Context, Result};
    use log::info;
    use sqlx::SqlitePool;

    use crate::config::{Command, Config};
    use crate::loader::{load_appearances, load_scenes, TransactionOutcome};
    use crate::queries::{catalog, movie_duration, scenes_for_villain};
    use crate::storage::{
        close_pool, create_rivalry_table, create_scene_table, init_db_pool_with_path,
        run_migrations,
    };

    /// Opens the database named by `config`, runs `command`, closes the
    /// database, and returns the text to show the user.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be opened, the command fails outright, an
    /// appearance load rolls back, or a duration is asked for an unknown movie.
    pub async fn run_command(config: &Config, command: Command) -> Result<String> {
        let pool = init_db_pool_with_path(&config.db_path)
            .await
            .context("Failed to initialize database pool")?;

        let result = dispatch(&pool, command).await;
        close_pool(&pool).await;
        result
    }

    async fn dispatch(pool: &SqlitePool, command: Command) -> Result<String> {
        match command {
            Command::Init => {
                run_migrations(pool)
                    .await
                    .context("Failed to run database migrations")?;
                create_tables(pool).await
            }
            Command::CreateTables => create_tables(pool).await,
            Command::LoadScenes { file } => {
                let report = load_scenes(pool, &file)
                    .await
                    .with_context(|| format!("Failed to load scenes from {}", file.display()))?;
                Ok(format!(
                    "Inserted {} scene{} ({} skipped)",
                    report.inserted,
                    if report.inserted == 1 { "" } else { "s" },
                    report.skipped
                ))
            }
            Command::LoadAppearances { file } => {
                let outcome = load_appearances(pool, &file).await.with_context(|| {
                    format!("Failed to load appearances from {}", file.display())
                })?;
                match outcome {
                    TransactionOutcome::Committed {
                        primary_rows,
                        derived_rows,
                    } => Ok(format!(
                        "Inserted {} appearances and {} rivalries ({} rows)",
                        primary_rows,
                        derived_rows,
                        primary_rows + derived_rows
                    )),
                    TransactionOutcome::RolledBack(reason) => {
                        bail!("Load of {} rolled back: {}", file.display(), reason)
                    }
                }
            }
            Command::Catalog => Ok(catalog(pool).await?.to_string()),
            Command::Duration { title } => match movie_duration(pool, &title).await? {
                Some(minutes) => Ok(minutes.to_string()),
                None => bail!("No movie titled {:?}", title),
            },
            Command::Scenes { villain } => Ok(scenes_for_villain(pool, &villain).await?.to_string()),
        }
    }

    async fn create_tables(pool: &SqlitePool) -> Result<String> {
        let scene = create_scene_table(pool)
            .await
            .context("Failed to create scene table")?;
        let rivalry = create_rivalry_table(pool)
            .await
            .context("Failed to create rivalry table")?;
        info!("Schema ready");
        Ok(format!(
            "scene: {}, rivalry: {}",
            if scene { "created" } else { "already exists" },
            if rivalry { "created" } else { "already exists" }
        ))
    }
}
