//! Minimal CSV parsing for published spreadsheet exports.
//!
//! Supports exactly what a sheet export needs: one record per line, comma separators,
//! double-quoted fields that may contain commas, and `""` escapes. Multi-line quoted
//! fields and other delimiters are not supported.
//!
//! Parsing never fails. Malformed lines degrade to best-effort field extraction and
//! the caller decides what an empty result means.

use crate::models::{Fields, Record};

/// Parse CSV text into records keyed by the header line.
///
/// - Lines are split on `\n` or `\r\n`; blank lines are skipped wherever they appear.
/// - Fewer than two non-blank lines (no data rows) yields an empty vector.
/// - Rows shorter than the header are padded with empty strings; extra values are dropped.
pub fn parse_csv(text: &str) -> Vec<Record> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !trim(line).is_empty())
        .collect();

    if lines.len() < 2 {
        return Vec::new();
    }

    let header: Vec<String> = split_line(lines[0])
        .into_iter()
        .map(|token| strip_quotes(trim(token)).to_string())
        .collect();
    let layout = HeaderLayout::new(&header);

    let mut short_rows = 0usize;
    let mut long_rows = 0usize;

    let records: Vec<Record> = lines[1..]
        .iter()
        .map(|line| {
            let tokens: Vec<String> = split_line(line).into_iter().map(clean_value).collect();

            if tokens.len() < header.len() {
                short_rows += 1;
            } else if tokens.len() > header.len() {
                long_rows += 1;
            }

            layout.record(&tokens)
        })
        .collect();

    tracing::debug!(
        rows = records.len(),
        fields = layout.fields.len(),
        short_rows,
        long_rows,
        "Parsed CSV"
    );

    records
}

/// Split a line on commas that are not inside a double-quoted field.
///
/// A comma is inside quotes when an odd number of `"` characters precede it on the
/// line. Escaped quotes (`""`) come in pairs, so they never change the parity.
pub fn split_line(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut quotes = 0usize;
    let mut start = 0;

    for (i, ch) in line.char_indices() {
        match ch {
            '"' => quotes += 1,
            ',' if quotes % 2 == 0 => {
                fields.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);

    fields
}

/// Trim a data token, remove one layer of surrounding quotes and unescape `""`.
fn clean_value(token: &str) -> String {
    strip_quotes(trim(token)).replace("\"\"", "\"")
}

/// Remove one leading and one trailing `"` if present (not a general unquote).
fn strip_quotes(token: &str) -> &str {
    let token = token.strip_prefix('"').unwrap_or(token);
    token.strip_suffix('"').unwrap_or(token)
}

/// Whitespace trim that also drops a byte-order mark, which sheet exports may carry.
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Maps header columns to record fields.
///
/// Repeated header names collapse into one field at the position of their first
/// occurrence; the value comes from the last column carrying that name.
struct HeaderLayout {
    fields: Fields,
    columns: Vec<usize>,
}

impl HeaderLayout {
    fn new(header: &[String]) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(header.len());
        let mut columns: Vec<usize> = Vec::with_capacity(header.len());

        for (column, name) in header.iter().enumerate() {
            match names.iter().position(|n| n == name) {
                Some(existing) => columns[existing] = column,
                None => {
                    names.push(name.clone());
                    columns.push(column);
                }
            }
        }

        Self {
            fields: names.into(),
            columns,
        }
    }

    fn record(&self, tokens: &[String]) -> Record {
        let values = self
            .columns
            .iter()
            .map(|&column| tokens.get(column).cloned().unwrap_or_default())
            .collect();
        Record::new(self.fields.clone(), values)
    }
}
