//! Descriptors shared by several source schemas.

use crate::model::Alignment;
use serde::{Deserialize, Serialize};

/// A run of characters with uniform formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRun {
    /// Run text
    pub text: String,
    /// Bold run
    pub bold: bool,
    /// Italic run
    pub italic: bool,
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

impl SourceRun {
    /// Create an unstyled run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic and return self.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set font size and return self.
    pub fn sized(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }
}

/// List membership of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMarker {
    /// Nesting level (0 = top level)
    pub level: u8,
    /// Numbered list
    pub ordered: bool,
}

/// A paragraph as emitted by a word-processing, slide or OWPML reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceParagraph {
    /// Formatted runs
    pub runs: Vec<SourceRun>,

    /// Plain text, used when the reader emits no runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Paragraph style name (e.g. "Heading 2", "Title")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,

    /// Explicit heading level (1-6)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,

    /// Zero-based document outline level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_level: Option<u8>,

    /// Paragraph alignment
    pub alignment: Alignment,

    /// List membership
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListMarker>,
}

impl SourceParagraph {
    /// Create a paragraph from runs.
    pub fn from_runs(runs: Vec<SourceRun>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    /// Create a paragraph from plain text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::from_runs(vec![SourceRun::new(text)])
    }

    /// Set the style name and return self.
    pub fn with_style(mut self, name: impl Into<String>) -> Self {
        self.style_name = Some(name.into());
        self
    }

    /// Mark as list item and return self.
    pub fn with_list(mut self, level: u8, ordered: bool) -> Self {
        self.list = Some(ListMarker { level, ordered });
        self
    }

    /// Runs, synthesizing one from `text` when no runs were emitted.
    pub fn effective_runs(&self) -> Vec<SourceRun> {
        if self.runs.is_empty() {
            self.text.iter().map(SourceRun::new).collect()
        } else {
            self.runs.clone()
        }
    }

    /// Concatenated text without formatting.
    pub fn plain_text(&self) -> String {
        if self.runs.is_empty() {
            self.text.clone().unwrap_or_default()
        } else {
            self.runs.iter().map(|r| r.text.as_str()).collect()
        }
    }
}

/// Vertical merge marker of word-processing and slide tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalMerge {
    /// First cell of a vertical merge
    Restart,
    /// Cell covered by the merge above
    Continue,
}

/// A table cell as emitted by a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCell {
    /// Cell paragraphs
    pub paragraphs: Vec<SourceParagraph>,

    /// Plain text, used when the reader emits no paragraphs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Grid columns spanned (`gridSpan` / `colSpan`)
    pub col_span: i64,

    /// Grid rows spanned (`rowSpan`)
    pub row_span: i64,

    /// Vertical merge marker (`vMerge`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_merge: Option<VerticalMerge>,

    /// Covered by the left neighbour's span (`hMerge`)
    pub h_merge: bool,

    /// Explicit zero-based column address (`cellAddr colAddr`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<i64>,

    /// Explicit zero-based row address (`cellAddr rowAddr`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<i64>,

    /// Cell fill color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Cell alignment, taken from the first paragraph when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl Default for SourceCell {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            text: None,
            col_span: 1,
            row_span: 1,
            v_merge: None,
            h_merge: false,
            col: None,
            row: None,
            background: None,
            alignment: None,
        }
    }
}

impl SourceCell {
    /// Create a cell from plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create a cell from paragraphs.
    pub fn with_paragraphs(paragraphs: Vec<SourceParagraph>) -> Self {
        Self {
            paragraphs,
            ..Default::default()
        }
    }

    /// Set spans and return self.
    pub fn spanning(mut self, col_span: i64, row_span: i64) -> Self {
        self.col_span = col_span;
        self.row_span = row_span;
        self
    }

    /// Set the explicit grid address and return self.
    pub fn at(mut self, row: i64, col: i64) -> Self {
        self.row = Some(row);
        self.col = Some(col);
        self
    }

    /// Set the vertical merge marker and return self.
    pub fn v_merged(mut self, merge: VerticalMerge) -> Self {
        self.v_merge = Some(merge);
        self
    }
}

/// A table row as emitted by a reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRow {
    /// Cells in source order
    pub cells: Vec<SourceCell>,
}

impl SourceRow {
    /// Create a row from cells.
    pub fn new(cells: Vec<SourceCell>) -> Self {
        Self { cells }
    }

    /// Create a row of plain-text cells.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(SourceCell::text).collect())
    }
}

/// An image reference inside the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceImage {
    /// In-document identifier (relationship id, `binItem` id)
    #[serde(alias = "bin_item")]
    pub id: String,

    /// Target part name, when known (e.g. "media/image3.png")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Alternative text / description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl SourceImage {
    /// Create an image reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the target part name and return self.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set alternative text and return self.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// File name component of the target part.
    pub fn file_name(&self) -> Option<&str> {
        self.target
            .as_deref()
            .and_then(|t| t.rsplit(['/', '\\']).next())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_runs_from_text() {
        let para = SourceParagraph {
            text: Some("hello".to_string()),
            ..Default::default()
        };
        let runs = para.effective_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "hello");
        assert_eq!(para.plain_text(), "hello");
    }

    #[test]
    fn test_cell_defaults_from_json() {
        let cell: SourceCell = serde_json::from_str(r#"{"text":"x"}"#).unwrap();
        assert_eq!(cell.col_span, 1);
        assert_eq!(cell.row_span, 1);
        assert!(!cell.h_merge);
    }

    #[test]
    fn test_image_file_name() {
        let image = SourceImage::new("rId4").with_target("../media/image3.png");
        assert_eq!(image.file_name(), Some("image3.png"));
        assert_eq!(SourceImage::new("rId5").file_name(), None);
    }

    #[test]
    fn test_bin_item_alias() {
        let image: SourceImage = serde_json::from_str(r#"{"bin_item":"BIN0001"}"#).unwrap();
        assert_eq!(image.id, "BIN0001");
    }
}
