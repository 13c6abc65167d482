//! Column-oriented records and best-effort field decoding
//!
//! Storage hands over each datapoint as a map of column name to raw bytes.
//! Decoding is total: a column that cannot be parsed leaves the target field
//! untouched, and columns nobody knows about are skipped.

use std::collections::HashMap;
use std::str::FromStr;

/// Raw column data for one record, keyed by column name
pub type Columns = HashMap<String, Vec<u8>>;

/// Setter for a single named column
pub type FieldSetter<T> = fn(&mut T, &[u8]);

/// A type that can be populated column by column from a [`Columns`] map.
///
/// Implementors only provide the name → setter table; lookup and the
/// skipping of unknown names live here.
pub trait ColumnDecode: Default + 'static {
    const FIELDS: &'static [(&'static str, FieldSetter<Self>)];

    /// Apply one column. Returns whether the name was recognised.
    fn decode_column(&mut self, name: &str, data: &[u8]) -> bool {
        match Self::FIELDS.iter().find(|(field, _)| *field == name) {
            Some((_, set)) => {
                set(self, data);
                true
            }
            None => {
                log::trace!("Ignoring unknown column '{}'", name);
                false
            }
        }
    }

    fn from_columns(columns: &Columns) -> Self {
        let mut decoded = Self::default();
        for (name, data) in columns {
            decoded.decode_column(name, data);
        }
        decoded
    }
}

/// Column payload as text; invalid UTF-8 sequences are replaced rather than rejected
pub fn text(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

/// Parse the payload into `target`, keeping the current value if it does not parse
pub fn parse_or_retain<T: FromStr>(target: &mut T, data: &[u8]) {
    let raw = text(data);
    match raw.trim().parse::<T>() {
        Ok(value) => *target = value,
        Err(_) => log::debug!("Keeping previous value; cannot parse '{}'", raw),
    }
}

/// Look the payload up in `table`, keeping the current value on unknown text
pub fn lookup_or_retain<T: Copy>(target: &mut T, data: &[u8], table: &[(&str, T)]) {
    let raw = text(data);
    match lookup(table, &raw) {
        Some(value) => *target = value,
        None => log::debug!("Keeping previous value; unrecognised '{}'", raw),
    }
}

pub fn lookup<T: Copy>(table: &[(&str, T)], text: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == text)
        .map(|(_, value)| *value)
}

/// Build a [`Columns`] map from string pairs
pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Columns {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.as_bytes().to_vec()))
        .collect()
}
