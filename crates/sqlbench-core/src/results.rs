//! Derivation of the rendered result table from raw query rows

use serde::Serialize;
use serde_json::Value;

use crate::types::Row;

/// Maximum number of rows rendered, regardless of how many the backend sent
pub const MAX_RENDERED_ROWS: usize = 200;

/// Internal identifier columns that are never shown
pub const HIDDEN_COLUMNS: &[&str] = &["tconst", "parentTconst", "titleId"];

/// A display-ready view of a row sequence.
///
/// Columns come from the first row's keys in order, minus [`HIDDEN_COLUMNS`].
/// Later rows may carry different keys; missing cells render empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Row count as returned, before the render cap
    pub total_rows: usize,
}

impl ResultTable {
    pub fn derive(rows: &[Row]) -> Self {
        let columns = visible_columns(rows);
        let rendered = rows
            .iter()
            .take(MAX_RENDERED_ROWS)
            .map(|row| {
                columns
                    .iter()
                    .map(|c| row.get(c).map(display_cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows: rendered,
            total_rows: rows.len(),
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.total_rows > self.rows.len()
    }
}

/// Column headers derived from the first row
pub fn visible_columns(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|first| {
            first
                .keys()
                .filter(|k| !HIDDEN_COLUMNS.contains(&k.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Render a single cell: strings verbatim, everything else as JSON text.
pub fn display_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("test rows must be objects"),
        }
    }

    #[test]
    fn test_columns_follow_first_row_minus_hidden() {
        let rows = vec![
            row(json!({"tconst": "tt1", "primaryTitle": "Heat", "startYear": 1995})),
            row(json!({"primaryTitle": "Ronin", "extra": true})),
        ];
        let table = ResultTable::derive(&rows);
        assert_eq!(table.columns, vec!["primaryTitle", "startYear"]);
        assert_eq!(table.rows[0], vec!["Heat", "1995"]);
        // Missing key renders empty, unknown key is not shown
        assert_eq!(table.rows[1], vec!["Ronin", ""]);
    }

    #[test]
    fn test_all_hidden_columns_are_excluded() {
        let rows = vec![row(
            json!({"titleId": "tt1", "parentTconst": "tt0", "tconst": "tt2", "ordering": 1}),
        )];
        assert_eq!(visible_columns(&rows), vec!["ordering"]);
    }

    #[test]
    fn test_render_cap() {
        let rows: Vec<Row> = (0..250).map(|i| row(json!({ "n": i }))).collect();
        let table = ResultTable::derive(&rows);
        assert_eq!(table.rows.len(), MAX_RENDERED_ROWS);
        assert_eq!(table.total_rows, 250);
        assert!(table.is_truncated());
        assert_eq!(table.rows[199], vec!["199"]);
    }

    #[test]
    fn test_empty_rows() {
        let table = ResultTable::derive(&[]);
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
        assert!(!table.is_truncated());
    }

    #[test]
    fn test_display_cell() {
        assert_eq!(display_cell(&json!("text")), "text");
        assert_eq!(display_cell(&json!(null)), "null");
        assert_eq!(display_cell(&json!(8.5)), "8.5");
        assert_eq!(display_cell(&json!(false)), "false");
    }
}
