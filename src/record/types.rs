//! Typed records of the input formats.

use std::fmt;

use crate::config::{APPEARANCE_FIELD_COUNT, SCENE_FIELD_COUNT};
use crate::error_handling::MalformedRecord;
use crate::record::{DelimitedRecord, ParseRecord};
use crate::storage::insert::{InsertRow, SqlValue};

/// One scene of a movie: `movie_id;order_number;title;duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRecord {
    /// Movie the scene belongs to
    pub movie_id: i32,
    /// Position of the scene within the movie
    pub order_number: i32,
    /// Scene title
    pub title: String,
    /// Duration in minutes
    pub duration: i32,
}

impl ParseRecord for SceneRecord {
    const FIELD_COUNT: usize = SCENE_FIELD_COUNT;

    fn from_fields(fields: &DelimitedRecord<'_>) -> Result<Self, MalformedRecord> {
        Ok(Self {
            movie_id: fields.int(0)?,
            order_number: fields.int(1)?,
            title: fields.text(2)?.to_string(),
            duration: fields.int(3)?,
        })
    }
}

impl InsertRow for SceneRecord {
    const STATEMENT: &'static str =
        "INSERT INTO scene (movie_id, order_number, title, duration) VALUES (?, ?, ?, ?)";

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![
            SqlValue::Int(self.movie_id),
            SqlValue::Int(self.order_number),
            SqlValue::Text(&self.title),
            SqlValue::Int(self.duration),
        ]
    }
}

/// A hero facing a villain in a movie: `hero_id;villain_id;movie_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppearanceRecord {
    /// Hero
    pub hero_id: i32,
    /// Villain
    pub villain_id: i32,
    /// Movie
    pub movie_id: i32,
}

impl AppearanceRecord {
    /// The rivalry implied by this appearance.
    pub fn rivalry(&self) -> RivalryKey {
        RivalryKey {
            hero_id: self.hero_id,
            villain_id: self.villain_id,
        }
    }
}

impl ParseRecord for AppearanceRecord {
    const FIELD_COUNT: usize = APPEARANCE_FIELD_COUNT;

    fn from_fields(fields: &DelimitedRecord<'_>) -> Result<Self, MalformedRecord> {
        Ok(Self {
            hero_id: fields.int(0)?,
            villain_id: fields.int(1)?,
            movie_id: fields.int(2)?,
        })
    }
}

impl InsertRow for AppearanceRecord {
    const STATEMENT: &'static str =
        "INSERT INTO appearance (hero_id, villain_id, movie_id) VALUES (?, ?, ?)";

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![
            SqlValue::Int(self.hero_id),
            SqlValue::Int(self.villain_id),
            SqlValue::Int(self.movie_id),
        ]
    }
}

/// A hero/villain pair, the key of the `rivalry` table.
///
/// The first encounter date is left NULL on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RivalryKey {
    /// Hero
    pub hero_id: i32,
    /// Villain
    pub villain_id: i32,
}

impl InsertRow for RivalryKey {
    const STATEMENT: &'static str = "INSERT INTO rivalry (hero_id, villain_id) VALUES (?, ?)";

    fn values(&self) -> Vec<SqlValue<'_>> {
        vec![SqlValue::Int(self.hero_id), SqlValue::Int(self.villain_id)]
    }
}

impl fmt::Display for RivalryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.hero_id, self.villain_id)
    }
}
