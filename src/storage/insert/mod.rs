//! Insert operations.
//!
//! Row-level writes shared by both loaders. See [`row`] for the failure
//! contract.

mod row;

pub use row::{insert_record, insert_row, InsertRow, SqlValue};
