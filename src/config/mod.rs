//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (delimiters, record arities, table names)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, Config, LogFormat, LogLevel};
