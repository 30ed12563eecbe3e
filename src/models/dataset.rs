//! Dataset model: the ordered records of one data source.

use super::record::{Fields, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// The two independent data sources served by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Store directory (subject → floor/location)
    Directory,
    /// Frequently asked questions
    Faq,
}

impl DatasetKind {
    /// Name used in user-facing messages ("directory", "FAQ").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Faq => "FAQ",
        }
    }

    /// Plural noun for the rows of this dataset in status lines.
    pub fn row_noun(&self) -> &'static str {
        match self {
            Self::Directory => "entries",
            Self::Faq => "questions",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "directory" => Ok(Self::Directory),
            "faq" => Ok(Self::Faq),
            other => Err(format!("Unknown dataset: {}", other)),
        }
    }
}

/// An ordered collection of records from one source.
///
/// Each dataset gets a process-unique generation number when created. Search indexes
/// remember the generation they were built from, which is how stale indexes are
/// detected after a reload.
#[derive(Debug, Clone)]
pub struct Dataset {
    kind: DatasetKind,
    fields: Fields,
    records: Vec<Record>,
    generation: u64,
}

impl Dataset {
    /// Create a dataset from parsed records. The field list is taken from the first record.
    pub fn new(kind: DatasetKind, records: Vec<Record>) -> Self {
        let fields = records
            .first()
            .map(|r| r.fields().clone())
            .unwrap_or_else(|| Vec::<String>::new().into());

        Self {
            kind,
            fields,
            records,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Create an empty dataset (the state before the first successful load).
    pub fn empty(kind: DatasetKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// Parse CSV text into a dataset.
    pub fn from_csv(kind: DatasetKind, text: &str) -> Self {
        Self::new(kind, crate::csv::parse_csv(text))
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    /// Header field names, in column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
