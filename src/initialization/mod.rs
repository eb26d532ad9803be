//! Application initialization.
//!
//! Sets up process-wide resources before any database work starts. Only the
//! logger lives here for now; the database session is opened through
//! [`crate::storage::init_db_pool_with_path`].

mod logger;

// Re-export public API
pub use logger::init_logger_with;
