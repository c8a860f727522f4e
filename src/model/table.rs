//! Table types.

use super::StyleAttributes;
use serde::{Deserialize, Serialize};

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    /// Cell text (may contain line breaks)
    pub text: String,

    /// Cell styling
    #[serde(default)]
    pub style: StyleAttributes,

    /// Number of columns this cell spans (>= 1)
    #[serde(default = "one")]
    pub col_span: u32,

    /// Number of rows this cell spans (>= 1)
    #[serde(default = "one")]
    pub row_span: u32,

    /// Whether this position is covered by another cell's span
    #[serde(default)]
    pub merged: bool,
}

fn one() -> u32 {
    1
}

impl CellData {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: StyleAttributes::default(),
            col_span: 1,
            row_span: 1,
            merged: false,
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Create a placeholder for a position covered by a merge.
    pub fn covered() -> Self {
        Self {
            merged: true,
            ..Self::empty()
        }
    }

    /// Set style and return self.
    pub fn with_style(mut self, style: StyleAttributes) -> Self {
        self.style = style;
        self
    }

    /// Set colspan and return self. Values below 1 are clamped.
    pub fn colspan(mut self, span: i64) -> Self {
        self.col_span = clamp_span(span);
        self
    }

    /// Set rowspan and return self. Values below 1 are clamped.
    pub fn rowspan(mut self, span: i64) -> Self {
        self.row_span = clamp_span(span);
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> &str {
        if self.merged {
            ""
        } else {
            &self.text
        }
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_spanning(&self) -> bool {
        self.col_span > 1 || self.row_span > 1
    }
}

impl Default for CellData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Clamp a source span value to the valid range.
pub fn clamp_span(span: i64) -> u32 {
    if span < 1 {
        1
    } else {
        u32::try_from(span).unwrap_or(u32::MAX)
    }
}

/// A table as an ordered sequence of rows of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableModel {
    /// Rows in the table
    pub rows: Vec<Vec<CellData>>,
}

impl TableModel {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create a table from rows of cells.
    pub fn from_rows(rows: Vec<Vec<CellData>>) -> Self {
        Self { rows }
    }

    /// Create a table from rows of text values.
    pub fn from_strings<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(CellData::text).collect())
                .collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<CellData>) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Return the rows padded with empty cells to the column count.
    pub fn padded_rows(&self) -> Vec<Vec<CellData>> {
        let width = self.column_count();
        self.rows
            .iter()
            .map(|row| {
                let mut padded = row.clone();
                padded.resize_with(width, CellData::empty);
                padded
            })
            .collect()
    }

    /// Check if the table has spanning or covered cells.
    pub fn has_merged_cells(&self) -> bool {
        self.rows
            .iter()
            .flatten()
            .any(|c| c.merged || c.is_spanning())
    }

    /// Check if every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().flatten().all(CellData::is_empty)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(CellData::plain_text)
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
