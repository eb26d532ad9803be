//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{DB_PATH, DB_PATH_ENV};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "superheroes_db", version, about)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = DB_PATH_ENV, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed by the binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply the base schema and create the scene and rivalry tables
    Init,
    /// Create the scene and rivalry tables if they do not exist yet
    CreateTables,
    /// Load `;`-separated scene lines, committing each row on its own
    LoadScenes {
        /// Input file
        file: PathBuf,
    },
    /// Load `;`-separated appearance lines and their rivalries in one transaction
    LoadAppearances {
        /// Input file
        file: PathBuf,
    },
    /// List all movie titles
    Catalog,
    /// Total duration in minutes of a movie's scenes
    Duration {
        /// Movie title
        title: String,
    },
    /// List the scenes of every movie a villain appears in
    Scenes {
        /// Villain name
        villain: String,
    },
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use superheroes_db::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("heroes.db"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            db_path: cli.db_path.clone(),
            log_level: cli.log_level.clone(),
            log_format: cli.log_format.clone(),
        }
    }
}
