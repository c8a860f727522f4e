//! Block-level types.

use super::{ChartModel, StyleAttributes, TableModel};
use serde::{Deserialize, Serialize};

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Bold text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    /// Italic text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    /// Verbatim code (equations, field codes)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub code: bool,
}

impl TextSpan {
    /// Create an unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            code: false,
        }
    }

    /// Create a span with explicit emphasis.
    pub fn styled(text: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            code: false,
        }
    }

    /// Create a verbatim code span.
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            code: true,
            ..Self::plain(text)
        }
    }
}

/// Inline text made of differently emphasized spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText {
    /// Spans in reading order
    pub spans: Vec<TextSpan>,
}

impl RichText {
    /// Create empty text.
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Create text from a single unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![TextSpan::plain(text)],
        }
    }

    /// Append a span, merging with the previous one when emphasis matches.
    pub fn push(&mut self, span: TextSpan) {
        if span.text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last)
                if !span.code
                    && !last.code
                    && last.bold == span.bold
                    && last.italic == span.italic =>
            {
                last.text.push_str(&span.text);
            }
            _ => self.spans.push(span),
        }
    }

    /// Concatenated text without emphasis.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Check if the text is blank.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }

    /// Check if every non-blank span is bold.
    pub fn is_all_bold(&self) -> bool {
        let mut visible = self.spans.iter().filter(|s| !s.text.trim().is_empty());
        let mut any = false;
        let all = visible.all(|s| {
            any = true;
            s.bold
        });
        any && all
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        RichText::plain(text)
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        RichText::plain(text)
    }
}

/// A unit of document content.
///
/// Blocks carry no reference to the section that holds them; order is the
/// position within the section's block list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// A heading (H1-H6)
    Heading {
        /// Heading level, 1-6
        level: u8,
        /// Heading text
        text: String,
    },

    /// A paragraph of text
    Paragraph {
        /// Paragraph text
        text: RichText,
        /// Paragraph-level style
        #[serde(default)]
        style: StyleAttributes,
    },

    /// A list item
    ListItem {
        /// Item text
        text: RichText,
        /// Nesting level (0 = top level)
        level: u8,
        /// Ordered or bulleted
        ordered: bool,
        /// Item style
        #[serde(default)]
        style: StyleAttributes,
    },

    /// A table
    Table {
        /// Table content
        table: TableModel,
    },

    /// An image reference
    Image {
        /// Resolved path, `None` when the lookup failed
        path: Option<String>,
        /// Identifier of the image inside the source document
        source_id: String,
        /// Alternative text
        #[serde(default)]
        alt_text: String,
    },

    /// A chart rendered as a data table
    ChartRef {
        /// Chart data
        chart: ChartModel,
    },

    /// A horizontal rule / separator
    Divider,

    /// Side-by-side elements of one layout row
    Columns {
        /// One block list per column, left to right
        columns: Vec<Vec<Block>>,
    },
}

impl Block {
    /// Create a heading block (level clamped to 1-6).
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create an unstyled paragraph.
    pub fn paragraph(text: impl Into<RichText>) -> Self {
        Block::Paragraph {
            text: text.into(),
            style: StyleAttributes::default(),
        }
    }

    /// Create a styled paragraph.
    pub fn styled_paragraph(text: impl Into<RichText>, style: StyleAttributes) -> Self {
        Block::Paragraph {
            text: text.into(),
            style,
        }
    }

    /// Create a list item.
    pub fn list_item(text: impl Into<RichText>, level: u8, ordered: bool) -> Self {
        Block::ListItem {
            text: text.into(),
            level,
            ordered,
            style: StyleAttributes::default(),
        }
    }

    /// Create an image block.
    pub fn image(
        path: Option<String>,
        source_id: impl Into<String>,
        alt_text: impl Into<String>,
    ) -> Self {
        Block::Image {
            path,
            source_id: source_id.into(),
            alt_text: alt_text.into(),
        }
    }

    /// Create a table block.
    pub fn table(table: TableModel) -> Self {
        Block::Table { table }
    }

    /// Create a chart block.
    pub fn chart(chart: ChartModel) -> Self {
        Block::ChartRef { chart }
    }

    /// Create a multi-column layout row.
    pub fn columns(columns: Vec<Vec<Block>>) -> Self {
        Block::Columns { columns }
    }

    /// Check if this block would produce no visible output.
    pub fn is_empty(&self) -> bool {
        match self {
            Block::Heading { text, .. } => text.trim().is_empty(),
            Block::Paragraph { text, .. } | Block::ListItem { text, .. } => text.is_empty(),
            Block::Table { table } => table.is_empty(),
            Block::Columns { columns } => columns.iter().flatten().all(Block::is_empty),
            Block::Image { .. } | Block::ChartRef { .. } | Block::Divider => false,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } => text.clone(),
            Block::Paragraph { text, .. } | Block::ListItem { text, .. } => text.plain_text(),
            Block::Table { table } => table.plain_text(),
            Block::Image { alt_text, .. } => alt_text.clone(),
            Block::ChartRef { chart } => chart.display_title(),
            Block::Divider => String::new(),
            Block::Columns { columns } => columns
                .iter()
                .flatten()
                .map(Block::plain_text)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Number of charts in this block, including nested columns.
    pub fn chart_count(&self) -> usize {
        match self {
            Block::ChartRef { .. } => 1,
            Block::Columns { columns } => columns.iter().flatten().map(Block::chart_count).sum(),
            _ => 0,
        }
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table { .. })
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_text_merges_equal_spans() {
        let mut text = RichText::new();
        text.push(TextSpan::plain("Hello "));
        text.push(TextSpan::plain("world"));
        text.push(TextSpan::styled("!", true, false));

        assert_eq!(text.spans.len(), 2);
        assert_eq!(text.plain_text(), "Hello world!");
        assert!(!text.is_all_bold());
    }

    #[test]
    fn test_code_spans_never_merge() {
        let mut text = RichText::new();
        text.push(TextSpan::code("a"));
        text.push(TextSpan::code("b"));
        text.push(TextSpan::plain("c"));
        assert_eq!(text.spans.len(), 3);
    }

    #[test]
    fn test_all_bold_ignores_whitespace_spans() {
        let mut text = RichText::new();
        text.push(TextSpan::styled("Title", true, false));
        text.push(TextSpan::plain(" "));
        text.push(TextSpan::styled("Here", true, false));
        assert!(text.is_all_bold());
    }

    #[test]
    fn test_block_emptiness() {
        assert!(Block::paragraph("   ").is_empty());
        assert!(!Block::Divider.is_empty());
        assert!(Block::columns(vec![vec![Block::paragraph("")]]).is_empty());
        assert!(!Block::image(None, "rId1", "").is_empty());
    }

    #[test]
    fn test_chart_count_nested() {
        let chart = Block::chart(ChartModel::default());
        let columns = Block::columns(vec![vec![chart.clone()], vec![chart]]);
        assert_eq!(columns.chart_count(), 2);
    }

    #[test]
    fn test_block_json_shape() {
        let json = serde_json::to_string(&Block::chart(ChartModel::default())).unwrap();
        assert!(json.contains("\"kind\":\"chart_ref\""));
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chart_count(), 1);
    }

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(
            Block::heading(0, "x"),
            Block::Heading {
                level: 1,
                text: "x".into()
            }
        );
    }
}
