//! Delimited record parsing.
//!
//! Each input line is split on [`FIELD_DELIMITER`](crate::config::FIELD_DELIMITER)
//! into a [`DelimitedRecord`], whose arity is checked before the fields are
//! converted into one of the typed records in [`types`].

mod types;

pub use types::{AppearanceRecord, RivalryKey, SceneRecord};

use crate::error_handling::MalformedRecord;

/// Fields of one input line, borrowed from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedRecord<'a> {
    fields: Vec<&'a str>,
}

impl<'a> DelimitedRecord<'a> {
    /// Splits `line` on `delimiter` and checks that it yields exactly
    /// `expected` fields.
    pub fn split(line: &'a str, delimiter: char, expected: usize) -> Result<Self, MalformedRecord> {
        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != expected {
            return Err(MalformedRecord::FieldCount {
                expected,
                found: fields.len(),
            });
        }
        Ok(Self { fields })
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields. Never true for a split line.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw text of the field at `index` (0-based).
    ///
    /// An index past the last field is reported as a short record.
    pub fn text(&self, index: usize) -> Result<&'a str, MalformedRecord> {
        self.fields
            .get(index)
            .copied()
            .ok_or(MalformedRecord::FieldCount {
                expected: index + 1,
                found: self.fields.len(),
            })
    }

    /// Field at `index` (0-based) as a 32-bit integer.
    ///
    /// Surrounding whitespace is ignored.
    pub fn int(&self, index: usize) -> Result<i32, MalformedRecord> {
        let raw = self.text(index)?;
        raw.trim()
            .parse::<i32>()
            .map_err(|_| MalformedRecord::NotAnInteger {
                field: index + 1,
                value: raw.to_string(),
            })
    }
}

/// A typed record that can be read from one line of an input file.
pub trait ParseRecord: Sized {
    /// Number of delimited fields a line must contain.
    const FIELD_COUNT: usize;

    /// Converts an already split line into the record.
    fn from_fields(fields: &DelimitedRecord<'_>) -> Result<Self, MalformedRecord>;

    /// Splits and converts one line.
    fn parse_line(line: &str) -> Result<Self, MalformedRecord> {
        let fields =
            DelimitedRecord::split(line, crate::config::FIELD_DELIMITER, Self::FIELD_COUNT)?;
        Self::from_fields(&fields)
    }
}

/// Whether a line carries no data and should be ignored by the loaders.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
