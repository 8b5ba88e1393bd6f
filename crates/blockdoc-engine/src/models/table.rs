use serde::{Deserialize, Serialize};

/// Structured payload of a table block.
///
/// `rows` is rectangular: every constructor in this crate pads ragged input
/// to the widest row. Nested or merged cells are not represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub rows: Vec<Vec<String>>,
    pub has_header_row: bool,
    pub has_header_column: bool,
}

impl TableData {
    /// Builds table data, padding ragged rows with empty cells.
    pub fn new(rows: Vec<Vec<String>>, has_header_row: bool, has_header_column: bool) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            rows,
            has_header_row,
            has_header_column,
        }
    }

    /// Tab+newline flattening used as the plain-text mirror of `rows`.
    pub fn flatten(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
