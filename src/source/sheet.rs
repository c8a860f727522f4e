//! Spreadsheet element stream.

use super::SourceImage;
use crate::model::{ChartModel, StyleAttributes};
use serde::{Deserialize, Serialize};

/// One worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSource {
    /// Sheet name as shown on its tab
    pub name: String,

    /// Hidden sheet
    pub hidden: bool,

    /// Populated cells; absent when the reader found no `sheetData`
    pub cells: Option<Vec<SheetCell>>,

    /// Merged ranges
    pub merges: Vec<MergeRange>,

    /// Charts drawn on the sheet
    pub charts: Vec<ChartModel>,

    /// Pictures drawn on the sheet
    pub images: Vec<SourceImage>,
}

impl SheetSource {
    /// Create a sheet from cells.
    pub fn new(name: impl Into<String>, cells: Vec<SheetCell>) -> Self {
        Self {
            name: name.into(),
            cells: Some(cells),
            ..Default::default()
        }
    }

    /// Add a merged range and return self.
    pub fn with_merge(mut self, merge: MergeRange) -> Self {
        self.merges.push(merge);
        self
    }
}

/// A populated cell with its zero-based grid address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetCell {
    /// Zero-based row
    pub row: u32,

    /// Zero-based column
    pub col: u32,

    /// Formatted cell value
    #[serde(default)]
    pub text: String,

    /// Cell style
    #[serde(default)]
    pub style: StyleAttributes,
}

impl SheetCell {
    /// Create a cell.
    pub fn new(row: u32, col: u32, text: impl Into<String>) -> Self {
        Self {
            row,
            col,
            text: text.into(),
            style: StyleAttributes::default(),
        }
    }
}

/// A merged range, inclusive on both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRange {
    /// First row
    pub first_row: u32,
    /// First column
    pub first_col: u32,
    /// Last row
    pub last_row: u32,
    /// Last column
    pub last_col: u32,
}

impl MergeRange {
    /// Create a range.
    pub fn new(first_row: u32, first_col: u32, last_row: u32, last_col: u32) -> Self {
        Self {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    /// Parse an A1-style reference such as `B2:D4`.
    pub fn parse(reference: &str) -> Option<Self> {
        let (start, end) = reference.split_once(':')?;
        let (first_row, first_col) = parse_a1(start)?;
        let (last_row, last_col) = parse_a1(end)?;
        Some(Self::new(
            first_row.min(last_row),
            first_col.min(last_col),
            first_row.max(last_row),
            first_col.max(last_col),
        ))
    }

    /// Columns covered.
    pub fn width(&self) -> u32 {
        self.last_col.saturating_sub(self.first_col) + 1
    }

    /// Rows covered.
    pub fn height(&self) -> u32 {
        self.last_row.saturating_sub(self.first_row) + 1
    }

    /// Check if a grid address lies inside the range.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }
}

/// Parse `C7` into zero-based `(row, col)`.
fn parse_a1(cell: &str) -> Option<(u32, u32)> {
    let cell = cell.trim().replace('$', "");
    let split = cell.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let col = letters
        .chars()
        .try_fold(0u32, |acc, c| {
            acc.checked_mul(26)?
                .checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)
        })?;
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}
