//! Record model representing one parsed spreadsheet row.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// Shared, ordered list of field names taken from a CSV header line.
///
/// Every record of a dataset points at the same header, so the key set is uniform
/// across the dataset without copying the names per row.
pub type Fields = Arc<[String]>;

/// One spreadsheet row as an ordered field name → value mapping.
///
/// Field names are case-preserving and come from the header line. A record always
/// holds exactly one value per field; missing values are the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Fields,
    values: Vec<String>,
}

impl Record {
    /// Create a record over `fields`.
    ///
    /// Short value lists are padded with empty strings; extra values are dropped.
    pub fn new(fields: Fields, mut values: Vec<String>) -> Self {
        values.resize(fields.len(), String::new());
        Self { fields, values }
    }

    /// Build a record from `(field, value)` pairs, mostly useful for fixtures.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let fields: Fields = pairs.iter().map(|(f, _)| f.to_string()).collect();
        let values = pairs.iter().map(|(_, v)| v.to_string()).collect();
        Self::new(fields, values)
    }

    /// Look up a field value. `None` when the field is not part of the header.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.position(field).map(|i| self.values[i].as_str())
    }

    /// Look up a field value, treating an unknown field as empty.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Value at a header position.
    pub fn value_at(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    /// Position of `field` in the header.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// The header this record was built from.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Iterate `(field, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}
