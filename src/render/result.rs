//! Rendering result with metadata and statistics.

use crate::model::{Block, Document, Metadata};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ExtractionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: ExtractionStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of sections rendered
    pub section_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of list items
    pub list_item_count: u32,

    /// Number of tables, chart tables excluded
    pub table_count: u32,

    /// Number of charts
    pub chart_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Images whose file could not be resolved
    pub unresolved_image_count: u32,

    /// Number of dividers
    pub divider_count: u32,

    /// Number of multi-column layout rows
    pub column_row_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally every section and block of a document without rendering it.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for section in &doc.sections {
            stats.add_section();
            for block in &section.blocks {
                stats.add_block(block);
            }
        }
        stats.count_text(&doc.plain_text());
        stats
    }

    /// Increment section count.
    pub fn add_section(&mut self) {
        self.section_count += 1;
    }

    /// Count one block, recursing into layout rows.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Heading { .. } => self.heading_count += 1,
            Block::Paragraph { .. } => self.paragraph_count += 1,
            Block::ListItem { .. } => self.list_item_count += 1,
            Block::Table { .. } => self.table_count += 1,
            Block::ChartRef { .. } => self.chart_count += 1,
            Block::Image { path, .. } => {
                self.image_count += 1;
                if path.is_none() {
                    self.unresolved_image_count += 1;
                }
            }
            Block::Divider => self.divider_count += 1,
            Block::Columns { columns } => {
                self.column_row_count += 1;
                for block in columns.iter().flatten() {
                    self.add_block(block);
                }
            }
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.section_count += other.section_count;
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.chart_count += other.chart_count;
        self.image_count += other.image_count;
        self.unresolved_image_count += other.unresolved_image_count;
        self.divider_count += other.divider_count;
        self.column_row_count += other.column_row_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChartModel;

    #[test]
    fn test_stats_from_document() {
        use crate::model::{Section, SectionKind};

        let mut doc = Document::new();
        doc.add_section(Section::new(
            "Sheet1",
            SectionKind::Sheet,
            vec![Block::heading(3, "Totals"), Block::image(None, "rId1", "")],
        ));
        let stats = ExtractionStats::from_document(&doc);
        assert_eq!(stats.section_count, 1);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.unresolved_image_count, 1);
        assert_eq!(stats.word_count, 1);
    }

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_add_block_recurses_into_columns() {
        let mut stats = ExtractionStats::new();
        stats.add_block(&Block::columns(vec![
            vec![Block::paragraph("a"), Block::image(None, "rId1", "")],
            vec![Block::chart(ChartModel::default())],
        ]));

        assert_eq!(stats.column_row_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.image_count, 1);
        assert_eq!(stats.unresolved_image_count, 1);
        assert_eq!(stats.chart_count, 1);
    }

    #[test]
    fn test_extraction_stats_merge() {
        let mut stats1 = ExtractionStats {
            paragraph_count: 5,
            table_count: 2,
            ..Default::default()
        };
        let stats2 = ExtractionStats {
            paragraph_count: 3,
            table_count: 1,
            chart_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.chart_count, 4);
    }

    #[test]
    fn test_render_result_content_only() {
        let result = RenderResult::content_only("# Hello".to_string());
        assert_eq!(result.content_len(), 7);
        assert_eq!(result.stats, ExtractionStats::default());
    }
}
