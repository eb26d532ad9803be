//! All-or-nothing loading of appearances and the rivalries they imply.
//!
//! The load runs as a small state machine over one transaction:
//!
//! ```text
//! Primary ──ok──> Derived ──ok──> Commit
//!    │               │
//!    └────err────────┴──────────> Rollback
//! ```
//!
//! `Primary` inserts one `appearance` row per line and collects the distinct
//! (hero, villain) pairs in first-seen order. `Derived` inserts each pair into
//! `rivalry`. The transaction guard and the file handle are released on every
//! path; an uncommitted guard rolls back when dropped.

use std::path::Path;

use indexmap::IndexSet;
use log::{debug, error, info, warn};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::fs::File;
use tokio::io::{BufReader, Lines};

use crate::error_handling::{LoadError, SqlDiagnostic, TransactionAbort};
use crate::loader::{open_lines, TransactionOutcome};
use crate::record::{AppearanceRecord, ParseRecord, RivalryKey};
use crate::storage::insert::insert_record;

/// Where an atomic load stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BatchState {
    /// Inserting primary rows
    Primary,
    /// Inserting derived pairs
    Derived { primary_rows: u64 },
    /// Both phases succeeded
    Commit { primary_rows: u64, derived_rows: u64 },
    /// A phase failed
    Rollback(TransactionAbort),
}

impl BatchState {
    /// Next state once the current phase reports `result` (rows written, or
    /// why it stopped). Terminal states do not move.
    pub(crate) fn advance(self, result: Result<u64, TransactionAbort>) -> BatchState {
        match (self, result) {
            (state @ (BatchState::Commit { .. } | BatchState::Rollback(_)), _) => state,
            (_, Err(reason)) => BatchState::Rollback(reason),
            (BatchState::Primary, Ok(primary_rows)) => BatchState::Derived { primary_rows },
            (BatchState::Derived { primary_rows }, Ok(derived_rows)) => BatchState::Commit {
                primary_rows,
                derived_rows,
            },
        }
    }
}

/// Loads appearance lines (`hero_id;villain_id;movie_id`) into `appearance`
/// and their distinct (hero, villain) pairs into `rivalry`, in one transaction.
///
/// Stops at the first malformed line or rejected insert and rolls everything
/// back. Each pair is inserted once however many lines repeat it; a pair
/// already present in `rivalry` is a rejected insert.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened (no transaction is
/// started) or the transaction cannot begin. Every later failure is reported
/// as [`TransactionOutcome::RolledBack`].
pub async fn load_appearances(
    pool: &SqlitePool,
    path: &Path,
) -> Result<TransactionOutcome, LoadError> {
    let mut lines = open_lines(path).await?;

    let mut tx = pool.begin().await.map_err(|e| {
        let diagnostic = SqlDiagnostic::from(&e);
        error!("Failed to begin transaction: {}", diagnostic);
        LoadError::Persistence(diagnostic)
    })?;

    let mut rivalries: IndexSet<RivalryKey> = IndexSet::new();
    let mut state = BatchState::Primary;

    let outcome = loop {
        state = match state {
            BatchState::Primary => {
                let result = primary_phase(&mut tx, &mut lines, &mut rivalries).await;
                BatchState::Primary.advance(result)
            }
            BatchState::Derived { primary_rows } => {
                let result = derived_phase(&mut tx, &rivalries).await;
                BatchState::Derived { primary_rows }.advance(result)
            }
            BatchState::Commit {
                primary_rows,
                derived_rows,
            } => break commit(tx, primary_rows, derived_rows).await,
            BatchState::Rollback(reason) => break rollback(tx, reason).await,
        };
        debug!("Appearance load of {}: {:?}", path.display(), state);
    };

    match &outcome {
        TransactionOutcome::Committed {
            primary_rows,
            derived_rows,
        } => info!(
            "Loaded {} appearances and {} rivalries from {}",
            primary_rows,
            derived_rows,
            path.display()
        ),
        TransactionOutcome::RolledBack(reason) => {
            warn!("Rolled back load of {}: {}", path.display(), reason)
        }
    }
    Ok(outcome)
}

/// Inserts one appearance per line and records its rivalry.
async fn primary_phase(
    tx: &mut Transaction<'_, Sqlite>,
    lines: &mut Lines<BufReader<File>>,
    rivalries: &mut IndexSet<RivalryKey>,
) -> Result<u64, TransactionAbort> {
    let mut line_number = 0usize;
    let mut rows = 0u64;

    while let Some(line) = lines.next_line().await.map_err(|e| {
        error!("IO error message: {}", e);
        TransactionAbort::Io(e.to_string())
    })? {
        line_number += 1;

        // A blank line is a malformed record here like any other
        let appearance = AppearanceRecord::parse_line(&line).map_err(|source| {
            warn!("Line {} is malformed: {}", line_number, source);
            TransactionAbort::Malformed {
                line: line_number,
                source,
            }
        })?;

        if !insert_record(&mut **tx, &appearance).await {
            return Err(TransactionAbort::PrimaryInsert { line: line_number });
        }
        rows += 1;
        rivalries.insert(appearance.rivalry());
    }

    Ok(rows)
}

/// Inserts every distinct rivalry, in first-seen order.
async fn derived_phase(
    tx: &mut Transaction<'_, Sqlite>,
    rivalries: &IndexSet<RivalryKey>,
) -> Result<u64, TransactionAbort> {
    for key in rivalries {
        if !insert_record(&mut **tx, key).await {
            return Err(TransactionAbort::DerivedInsert { key: *key });
        }
    }
    Ok(rivalries.len() as u64)
}

async fn commit(
    tx: Transaction<'_, Sqlite>,
    primary_rows: u64,
    derived_rows: u64,
) -> TransactionOutcome {
    match tx.commit().await {
        Ok(()) => TransactionOutcome::Committed {
            primary_rows,
            derived_rows,
        },
        Err(e) => {
            let diagnostic = SqlDiagnostic::from(&e);
            error!("{}", diagnostic);
            TransactionOutcome::RolledBack(TransactionAbort::Commit(diagnostic))
        }
    }
}

async fn rollback(tx: Transaction<'_, Sqlite>, reason: TransactionAbort) -> TransactionOutcome {
    if let Err(e) = tx.rollback().await {
        // The connection discards the open transaction when it is returned
        error!("{}", SqlDiagnostic::from(&e));
    }
    TransactionOutcome::RolledBack(reason)
}
