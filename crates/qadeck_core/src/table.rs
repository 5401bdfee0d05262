//! Naive CSV parsing and exact-match cell lookup for test-data sets.
//!
//! The grammar is deliberately primitive: split lines on `\n`, cells on
//! `,`, trim everything. No quoting, no escaping, no type coercion. Ragged
//! rows are kept rather than rejected; the worst outcome of malformed input
//! is a mis-rendered table, never an error.

use crate::models::dataset::TableData;

/// Parse CSV text into a table. The first row becomes the headers.
///
/// Empty input yields an empty table (no headers, no rows).
pub fn parse_csv(text: &str) -> TableData {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return TableData::default();
    }
    let mut rows: Vec<Vec<String>> = trimmed
        .split('\n')
        .map(|line| line.split(',').map(|cell| cell.trim().to_string()).collect())
        .collect();
    let headers = if rows.is_empty() { Vec::new() } else { rows.remove(0) };
    TableData { headers, rows }
}

/// Membership lookup: true iff any cell in any row equals the trimmed
/// query exactly. An empty query never matches.
///
/// O(rows x columns); datasets are hundreds to low thousands of rows, so
/// this is re-run freely on every SKU-shaped keystroke.
pub fn contains_value(table: &TableData, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return false;
    }
    table
        .rows
        .iter()
        .any(|row| row.iter().any(|cell| cell == query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_table() {
        let table = parse_csv("a,b\n1,2\n3,4");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn parse_trims_cells_and_handles_crlf() {
        let table = parse_csv("sku , label\r\n 12345678 , red shirt \r\n");
        assert_eq!(table.headers, vec!["sku", "label"]);
        assert_eq!(table.rows, vec![vec!["12345678", "red shirt"]]);
    }

    #[test]
    fn parse_keeps_ragged_rows() {
        let table = parse_csv("a,b\n1\n2,3,4");
        assert_eq!(table.rows, vec![vec!["1"], vec!["2", "3", "4"]]);
    }

    #[test]
    fn parse_empty_input_yields_empty_table() {
        let table = parse_csv("   \n  ");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn reparse_of_serialized_table_is_idempotent() {
        let table = parse_csv("a,b\n1,2\n3,4");
        let mut lines = vec![table.headers.join(",")];
        lines.extend(table.rows.iter().map(|row| row.join(",")));
        let reparsed = parse_csv(&lines.join("\n"));
        assert_eq!(reparsed, table);
    }

    #[test]
    fn lookup_is_exact_match_after_query_trim() {
        let table = parse_csv("sku\n12345678\n87654321");
        assert!(contains_value(&table, "12345678"));
        assert!(contains_value(&table, "  87654321  "));
        assert!(!contains_value(&table, "1234567"));
        assert!(!contains_value(&table, "123456789"));
    }

    #[test]
    fn lookup_rejects_empty_query() {
        let table = parse_csv("sku\n12345678");
        assert!(!contains_value(&table, ""));
        assert!(!contains_value(&table, "   "));
    }

    #[test]
    fn lookup_on_empty_table_is_false() {
        assert!(!contains_value(&TableData::default(), "12345678"));
    }
}
