//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `superheroes_db` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use superheroes_db::initialization::init_logger_with;
use superheroes_db::{run_command, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // SUPERHEROES_DB_PATH may come from a .env file in the working directory
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::from(&cli);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_command(&config, cli.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("superheroes_db error: {:#}", e);
            process::exit(1);
        }
    }
}
