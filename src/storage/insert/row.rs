//! Single-row insertion.
//!
//! [`insert_row`] is the only place the loaders touch the store for writes.
//! It binds the values positionally, executes once, and reports the result as
//! a `bool`: the sqlx error is logged with its diagnostic and goes no further.

use sqlx::{Executor, Sqlite};

use crate::error_handling::SqlDiagnostic;

/// A value bound to one statement parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlValue<'a> {
    /// INTEGER column
    Int(i32),
    /// TEXT column
    Text(&'a str),
}

/// A record that maps onto one parameterized INSERT.
pub trait InsertRow {
    /// INSERT statement with one `?` per value, in [`values`](Self::values) order.
    const STATEMENT: &'static str;

    /// Values to bind, in parameter order.
    fn values(&self) -> Vec<SqlValue<'_>>;
}

/// Inserts `row` through `executor` (the pool for autocommit, or an open
/// transaction).
///
/// Returns `true` when exactly the statement ran; a failed statement leaves no
/// row behind.
pub async fn insert_record<'e, E, R>(executor: E, row: &R) -> bool
where
    E: Executor<'e, Database = Sqlite>,
    R: InsertRow,
{
    insert_row(executor, R::STATEMENT, &row.values()).await
}

/// Binds `values` to `statement` and executes it.
pub async fn insert_row<'e, E>(executor: E, statement: &str, values: &[SqlValue<'_>]) -> bool
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut query = sqlx::query(statement);
    for value in values {
        query = match *value {
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Text(s) => query.bind(s),
        };
    }

    match query.execute(executor).await {
        Ok(result) => {
            log::trace!(
                "Inserted {} row(s) with {} bound values",
                result.rows_affected(),
                values.len()
            );
            true
        }
        Err(e) => {
            log::error!("{}", SqlDiagnostic::from(&e));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::{create_test_pool, seed_movies};
    use sqlx::Row;

    #[tokio::test]
    async fn test_insert_row_binds_positionally() {
        let pool = create_test_pool().await;
        seed_movies(&pool, &[(1, "Iron Man")]).await;

        let ok = insert_row(
            &pool,
            "INSERT INTO scene (movie_id, order_number, title, duration) VALUES (?, ?, ?, ?)",
            &[
                SqlValue::Int(1),
                SqlValue::Int(2),
                SqlValue::Text("Cave"),
                SqlValue::Int(12),
            ],
        )
        .await;
        assert!(ok);

        let row = sqlx::query("SELECT order_number, title, duration FROM scene WHERE movie_id = 1")
            .fetch_one(&pool)
            .await
            .expect("scene row");
        assert_eq!(row.get::<i32, _>("order_number"), 2);
        assert_eq!(row.get::<String, _>("title"), "Cave");
        assert_eq!(row.get::<i32, _>("duration"), 12);
    }

    #[tokio::test]
    async fn test_insert_row_reports_constraint_failure() {
        let pool = create_test_pool().await;

        // No movie 99: the foreign key rejects the scene
        let ok = insert_row(
            &pool,
            "INSERT INTO scene (movie_id, order_number, title, duration) VALUES (?, ?, ?, ?)",
            &[
                SqlValue::Int(99),
                SqlValue::Int(1),
                SqlValue::Text("Orphan"),
                SqlValue::Int(3),
            ],
        )
        .await;
        assert!(!ok);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scene")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_insert_row_reports_bad_statement() {
        let pool = create_test_pool().await;
        assert!(!insert_row(&pool, "INSERT INTO no_such_table (x) VALUES (?)", &[SqlValue::Int(1)]).await);
    }

    #[tokio::test]
    async fn test_insert_record_inside_transaction() {
        let pool = create_test_pool().await;
        seed_movies(&pool, &[(1, "Iron Man")]).await;

        let scene = crate::record::SceneRecord {
            movie_id: 1,
            order_number: 1,
            title: "Opening".to_string(),
            duration: 4,
        };

        let mut tx = pool.begin().await.expect("Failed to start transaction");
        assert!(insert_record(&mut *tx, &scene).await);
        tx.rollback().await.expect("Failed to roll back transaction");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scene")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
