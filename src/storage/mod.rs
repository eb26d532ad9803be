//! Database access: session, base schema, on-demand tables, row inserts.

pub mod insert;
mod migrations;
mod pool;
pub mod schema;
#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used items
pub use migrations::run_migrations;
pub use pool::{close_pool, init_db_pool_with_path, DbPool};
pub use schema::{create_rivalry_table, create_scene_table, table_exists};
