//! Error handling.
//!
//! This module provides the error types of the crate:
//! - **Initialization**: logger setup
//! - **Database**: pool, migration and schema failures
//! - **Loading**: malformed records, unreadable files, and the reasons an
//!   atomic load rolls back
//!
//! Row-level failures never surface as `Err` to loader callers. They are
//! logged with a [`SqlDiagnostic`] and folded into the loader's outcome.

mod types;

// Re-export public API
pub use types::{
    DatabaseError, InitializationError, LoadError, MalformedRecord, SqlDiagnostic,
    TransactionAbort,
};
