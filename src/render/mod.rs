//! Text presentation of query results.
//!
//! Directory results render as a Markdown table, FAQ results as question cards.
//! Missing values render as empty text (or a card placeholder).

use crate::models::{DatasetKind, Record};

/// Column never shown in the directory table (compared case-insensitively).
pub const HIDDEN_COLUMN: &str = "KEYWORDS";

/// Status line after a search: `Found 2 of 3 entries.`
pub fn found_line(kind: DatasetKind, match_count: usize, total_count: usize) -> String {
    format!("Found {} of {} {}.", match_count, total_count, kind.row_noun())
}

/// Status line for the unfiltered view: `Showing all 3 entries.`
pub fn showing_all_line(kind: DatasetKind, total_count: usize) -> String {
    format!("Showing all {} {}.", total_count, kind.row_noun())
}

/// Static message shown when a dataset has never loaded.
pub fn load_failure_message(kind: DatasetKind) -> String {
    format!(
        "Error loading {} data. Please refresh the page.",
        kind.display_name()
    )
}

/// Label for a floor option.
pub fn floor_label(floor: &str) -> String {
    format!("Floor {}", floor)
}

/// Message for an empty result set.
pub fn no_results(query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        "No results found.".to_string()
    } else {
        format!(
            "No results found for \"{}\".\nTry searching with different keywords or check the spelling.",
            query
        )
    }
}

/// Render records as a Markdown table, omitting the keywords column.
pub fn render_table(records: &[Record], query: &str) -> String {
    let Some(first) = records.first() else {
        return no_results(query);
    };

    let headers: Vec<&str> = first
        .fields()
        .iter()
        .map(String::as_str)
        .filter(|field| !field.eq_ignore_ascii_case(HIDDEN_COLUMN))
        .collect();

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied());
    push_row(&mut out, headers.iter().map(|_| "---"));
    for record in records {
        push_row(&mut out, headers.iter().map(|field| record.value(field)));
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&escape_cell(cell));
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Render FAQ records as question cards.
pub fn render_cards(records: &[Record], query: &str) -> String {
    if records.is_empty() {
        return no_results(query);
    }

    records
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_card(record: &Record) -> String {
    let question = non_empty(record.value("Question")).unwrap_or("No Question");
    let answer = non_empty(record.value("Answer")).unwrap_or("No Answer.");

    let mut card = format!("❓ {}\n{}\n", question, answer);
    if let Some(category) = non_empty(record.value("Category")) {
        card.push_str(&format!("Category: {}\n", category));
    }
    card
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dataset;

    fn records(kind: DatasetKind, csv: &str) -> Vec<Record> {
        Dataset::from_csv(kind, csv).records().to_vec()
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(found_line(DatasetKind::Directory, 2, 3), "Found 2 of 3 entries.");
        assert_eq!(found_line(DatasetKind::Faq, 0, 5), "Found 0 of 5 questions.");
        assert_eq!(
            showing_all_line(DatasetKind::Directory, 12),
            "Showing all 12 entries."
        );
        assert_eq!(showing_all_line(DatasetKind::Faq, 4), "Showing all 4 questions.");
    }

    #[test]
    fn test_load_failure_messages() {
        assert_eq!(
            load_failure_message(DatasetKind::Directory),
            "Error loading directory data. Please refresh the page."
        );
        assert_eq!(
            load_failure_message(DatasetKind::Faq),
            "Error loading FAQ data. Please refresh the page."
        );
    }

    #[test]
    fn test_no_results() {
        assert_eq!(no_results(""), "No results found.");
        assert!(no_results("zebra").starts_with("No results found for \"zebra\"."));
        assert_eq!(render_table(&[], ""), "No results found.");
        assert_eq!(render_cards(&[], "  "), "No results found.");
    }

    #[test]
    fn test_table_hides_keywords_column() {
        let rows = records(
            DatasetKind::Directory,
            "FLOOR,NAME,keywords\n2,Alice,secret\n1,Bob,\n",
        );

        let table = render_table(&rows, "");
        assert_eq!(
            table,
            "| FLOOR | NAME |\n| --- | --- |\n| 2 | Alice |\n| 1 | Bob |\n"
        );
        assert!(!table.contains("secret"));
    }

    #[test]
    fn test_table_escapes_pipes() {
        let rows = records(DatasetKind::Directory, "NAME\nA|B\n");
        assert!(render_table(&rows, "").contains("| A\\|B |"));
    }

    #[test]
    fn test_cards_with_defaults() {
        let rows = records(
            DatasetKind::Faq,
            "Question,Answer,Category\nWhere is the cafe?,Floor 3,Amenities\n,,\n",
        );

        let cards = render_cards(&rows, "");
        assert_eq!(
            cards,
            "❓ Where is the cafe?\nFloor 3\nCategory: Amenities\n\n❓ No Question\nNo Answer.\n"
        );
    }

    #[test]
    fn test_floor_label() {
        assert_eq!(floor_label("2"), "Floor 2");
    }
}
