//! Bulk loaders for delimited input files.
//!
//! Two consistency policies:
//! - [`load_scenes`]: every line is its own autocommitted insert. Bad lines
//!   are logged and skipped; the load never rolls back.
//! - [`load_appearances`]: every appearance line and every rivalry derived
//!   from them are written in one transaction. Any bad line rolls back all
//!   of it.
//!
//! Both read the file lazily, line by line. [`load_scenes`] ignores blank
//! lines; [`load_appearances`] treats one as a malformed record.

mod atomic;
mod independent;

use std::path::Path;

use log::error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use crate::error_handling::{LoadError, TransactionAbort};

pub use atomic::load_appearances;
pub use independent::{load_independent, load_scenes};

/// Result of a best-effort load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines inserted and committed
    pub inserted: u64,
    /// Lines that were malformed or rejected by the store
    pub skipped: u64,
}

/// Result of an all-or-nothing load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Every row was written and the transaction committed.
    Committed {
        /// Rows inserted into the primary table
        primary_rows: u64,
        /// Unique derived pairs inserted into the secondary table
        derived_rows: u64,
    },
    /// Nothing was written.
    RolledBack(TransactionAbort),
}

impl TransactionOutcome {
    /// Total rows written: primary plus derived, or `0` after a rollback.
    ///
    /// An empty file that commits also yields `0`; use
    /// [`is_committed`](Self::is_committed) to tell the two apart.
    pub fn rows_affected(&self) -> u64 {
        match self {
            TransactionOutcome::Committed {
                primary_rows,
                derived_rows,
            } => primary_rows + derived_rows,
            TransactionOutcome::RolledBack(_) => 0,
        }
    }

    /// Whether the transaction committed.
    pub fn is_committed(&self) -> bool {
        matches!(self, TransactionOutcome::Committed { .. })
    }
}

/// Opens `path` as a lazy stream of lines.
async fn open_lines(path: &Path) -> Result<Lines<BufReader<File>>, LoadError> {
    let file = File::open(path).await.map_err(|e| {
        let err = LoadError::from_io(path, e);
        error!("{}", err);
        err
    })?;
    Ok(BufReader::new(file).lines())
}
