//! Read-side queries.
//!
//! Title lookups are returned as a [`TitleList`], which renders as
//! `{first, second, ...}` (or `{}` when nothing matched).

use std::fmt;

use sqlx::SqlitePool;

use crate::config::LIST_SEPARATOR;
use crate::error_handling::{DatabaseError, SqlDiagnostic};

/// Ordered titles from a single-column result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleList(Vec<String>);

impl TitleList {
    /// The titles, in query order.
    pub fn titles(&self) -> &[String] {
        &self.0
    }

    /// Whether no title matched.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for TitleList {
    fn from(titles: Vec<String>) -> Self {
        Self(titles)
    }
}

impl FromIterator<String> for TitleList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for TitleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.join(LIST_SEPARATOR))
    }
}

fn sql_error(e: sqlx::Error) -> DatabaseError {
    log::error!("{}", SqlDiagnostic::from(&e));
    DatabaseError::SqlError(e)
}

/// All movie titles, alphabetically.
pub async fn catalog(pool: &SqlitePool) -> Result<TitleList, DatabaseError> {
    let titles: Vec<String> = sqlx::query_scalar("SELECT title FROM movie ORDER BY title")
        .fetch_all(pool)
        .await
        .map_err(sql_error)?;
    Ok(titles.into())
}

/// Total duration in minutes of the scenes of the movie titled `title`.
///
/// `Ok(None)` if there is no such movie; `Ok(Some(0))` if it has no scenes.
pub async fn movie_duration(pool: &SqlitePool, title: &str) -> Result<Option<i64>, DatabaseError> {
    let movie_id: Option<i64> = sqlx::query_scalar("SELECT id FROM movie WHERE title = ?")
        .bind(title)
        .fetch_optional(pool)
        .await
        .map_err(sql_error)?;

    let Some(movie_id) = movie_id else {
        log::debug!("No movie titled {:?}", title);
        return Ok(None);
    };

    let total: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(duration), 0) FROM scene WHERE movie_id = ?")
            .bind(movie_id)
            .fetch_one(pool)
            .await
            .map_err(sql_error)?;
    Ok(Some(total))
}

/// Titles of every scene of every movie the villain named `villain` appears
/// in, alphabetically.
///
/// An unknown villain, or one without scenes, yields an empty list. Each
/// scene is listed once, even when the villain appears in its movie several
/// times (a plain join would repeat it per appearance).
pub async fn scenes_for_villain(
    pool: &SqlitePool,
    villain: &str,
) -> Result<TitleList, DatabaseError> {
    let titles: Vec<String> = sqlx::query_scalar(
        "SELECT s.title
         FROM scene s
         WHERE s.movie_id IN (
             SELECT a.movie_id
             FROM appearance a
             JOIN villain v ON v.id = a.villain_id
             WHERE v.name = ?
         )
         ORDER BY s.title",
    )
    .bind(villain)
    .fetch_all(pool)
    .await
    .map_err(sql_error)?;
    Ok(titles.into())
}
