//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::fmt;
use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

use crate::record::RivalryKey;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Applying the bundled migrations failed.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// A line that cannot be turned into a typed record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    /// The line does not split into the expected number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Arity of the record format
        expected: usize,
        /// Fields actually present
        found: usize,
    },

    /// An integer column holds something else.
    #[error("field {field} is not an integer: {value:?}")]
    NotAnInteger {
        /// 1-based field position
        field: usize,
        /// Raw field text
        value: String,
    },
}

/// Structured view of a failed store operation: code, state and message.
///
/// `code` is the SQLite extended result code when the failure came from the
/// database itself. `state` classifies the failure the way sqlx does
/// (`unique_violation`, `foreign_key_violation`, ...), or names the sqlx error
/// family for failures outside the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlDiagnostic {
    /// Vendor error code, if any
    pub code: Option<String>,
    /// Error classification
    pub state: &'static str,
    /// Human-readable message
    pub message: String,
}

impl From<&sqlx::Error> for SqlDiagnostic {
    fn from(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let state = match db_err.kind() {
                    sqlx::error::ErrorKind::UniqueViolation => "unique_violation",
                    sqlx::error::ErrorKind::ForeignKeyViolation => "foreign_key_violation",
                    sqlx::error::ErrorKind::NotNullViolation => "not_null_violation",
                    sqlx::error::ErrorKind::CheckViolation => "check_violation",
                    _ => "database",
                };
                Self {
                    code: db_err.code().map(|c| c.into_owned()),
                    state,
                    message: db_err.message().to_string(),
                }
            }
            sqlx::Error::PoolTimedOut => Self {
                code: None,
                state: "pool_timed_out",
                message: err.to_string(),
            },
            sqlx::Error::PoolClosed => Self {
                code: None,
                state: "pool_closed",
                message: err.to_string(),
            },
            sqlx::Error::Io(_) => Self {
                code: None,
                state: "io",
                message: err.to_string(),
            },
            _ => Self {
                code: None,
                state: "other",
                message: err.to_string(),
            },
        }
    }
}

impl From<sqlx::Error> for SqlDiagnostic {
    fn from(err: sqlx::Error) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for SqlDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SQL error message: {}; code: {}; state: {}",
            self.message,
            self.code.as_deref().unwrap_or("-"),
            self.state
        )
    }
}

/// Failures that end a loader call before it produces an outcome.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input file does not exist.
    #[error("File {} was not found", .0.display())]
    FileNotFound(PathBuf),

    /// The input file could not be opened or read.
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// Input file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The store refused to start the load.
    #[error("{0}")]
    Persistence(SqlDiagnostic),
}

impl LoadError {
    /// Classifies an error raised while opening or reading `path`.
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Why an atomic load rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionAbort {
    /// A line of the input file could not be parsed.
    #[error("line {line} is malformed: {source}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// Parse failure
        source: MalformedRecord,
    },

    /// The primary-table insert for a line failed.
    #[error("line {line} could not be inserted")]
    PrimaryInsert {
        /// 1-based line number
        line: usize,
    },

    /// A derived pair could not be inserted into the secondary table.
    #[error("derived pair {key} could not be inserted")]
    DerivedInsert {
        /// The rejected pair
        key: RivalryKey,
    },

    /// Reading the input file failed part way through.
    #[error("IO error: {0}")]
    Io(String),

    /// The final commit was refused.
    #[error("commit failed: {0}")]
    Commit(SqlDiagnostic),
}
