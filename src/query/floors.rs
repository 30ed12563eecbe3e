//! Selectable floor values for the directory's category filter.

use crate::models::Dataset;
use std::collections::HashSet;

/// Directory column holding the floor number.
pub const FLOOR_FIELD: &str = "FLOOR";

/// Distinct floor values a visitor can filter by, in ascending numeric order.
///
/// Only values that are a strictly positive integer (after trimming) are offered;
/// empty, non-numeric, zero and negative values are dropped from the option set (their
/// records stay searchable). Values are deduplicated as strings, so `"2"` and `"02"`
/// are separate options, each matching its own rows exactly.
pub fn floor_options(dataset: &Dataset) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut floors: Vec<(u64, String)> = dataset
        .records()
        .iter()
        .map(|record| record.value(FLOOR_FIELD))
        .filter(|value| seen.insert(value))
        .filter_map(|value| {
            let number = value.trim().parse::<u64>().ok()?;
            (number > 0).then(|| (number, value.to_string()))
        })
        .collect();

    floors.sort();
    floors.into_iter().map(|(_, value)| value).collect()
}
