//! Best-effort loading: one autocommitted insert per line.

use std::path::Path;

use log::{error, info, warn};
use sqlx::SqlitePool;

use crate::error_handling::LoadError;
use crate::loader::{open_lines, LoadReport};
use crate::record::{is_blank, ParseRecord, SceneRecord};
use crate::storage::insert::{insert_record, InsertRow};

/// Loads scene lines (`movie_id;order_number;title;duration`) into `scene`.
///
/// Each row is committed on its own. A failed row does not affect the
/// others, and rows committed before an I/O error stay in the table even
/// though the call then returns `Err`.
///
/// # Errors
///
/// Returns [`LoadError::FileNotFound`] or [`LoadError::Io`] if the file
/// cannot be opened or read. Malformed lines and rejected inserts are not
/// errors; they are counted in [`LoadReport::skipped`].
pub async fn load_scenes(pool: &SqlitePool, path: &Path) -> Result<LoadReport, LoadError> {
    load_independent::<SceneRecord>(pool, path).await
}

/// Loads every line of `path` as an `R`, committing each insert on its own.
pub async fn load_independent<R>(pool: &SqlitePool, path: &Path) -> Result<LoadReport, LoadError>
where
    R: ParseRecord + InsertRow,
{
    let mut lines = open_lines(path).await?;
    let mut report = LoadReport::default();
    let mut line_number = 0usize;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("IO error message: {}", e);
                return Err(LoadError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        line_number += 1;
        if is_blank(&line) {
            continue;
        }

        let record = match R::parse_line(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping line {} of {}: {}", line_number, path.display(), e);
                report.skipped += 1;
                continue;
            }
        };

        if insert_record(pool, &record).await {
            report.inserted += 1;
        } else {
            warn!(
                "Skipping line {} of {}: insert rejected",
                line_number,
                path.display()
            );
            report.skipped += 1;
        }
    }

    info!(
        "Loaded {} from {} ({} skipped)",
        report.inserted,
        path.display(),
        report.skipped
    );
    Ok(report)
}
