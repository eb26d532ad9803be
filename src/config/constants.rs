//! Configuration constants.
//!
//! Input file formats and database defaults shared by the loaders, the schema
//! module and the CLI.

use strum_macros::{AsRefStr, Display, EnumIter};

/// Default SQLite database file.
pub const DB_PATH: &str = "./superheroes.db";

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "SUPERHEROES_DB_PATH";

/// Field delimiter for scene and appearance input files.
pub const FIELD_DELIMITER: char = ';';

/// Scene lines: movie id, order number, title, duration in minutes.
pub const SCENE_FIELD_COUNT: usize = 4;

/// Appearance lines: hero id, villain id, movie id.
pub const APPEARANCE_FIELD_COUNT: usize = 3;

/// Separator used when a result set is rendered as a bracketed list.
pub const LIST_SEPARATOR: &str = ", ";

/// Tables of the superheroes schema.
///
/// `Scene` and `Rivalry` are created on demand by [`crate::storage::schema`];
/// the rest come from the bundled migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Table {
    /// Movies, unique by title
    Movie,
    /// Civil identities behind heroes
    RealPerson,
    /// Heroes, with optional avatar image
    Hero,
    /// Villains
    Villain,
    /// Hero/villain face-offs per movie
    Appearance,
    /// Ordered scenes of a movie
    Scene,
    /// Unique hero/villain pairs
    Rivalry,
}
