//! Document-level types.

use super::Block;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source format family a document was read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Word-processing document (DOCX)
    #[default]
    Word,
    /// Spreadsheet (XLSX)
    Spreadsheet,
    /// Presentation (PPTX)
    Presentation,
    /// Korean word processor (HWPX / OWPML)
    Hwp,
}

impl SourceFormat {
    /// Lowercase extensions handled for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceFormat::Word => &["docx", "docm", "dotx"],
            SourceFormat::Spreadsheet => &["xlsx", "xlsm"],
            SourceFormat::Presentation => &["pptx", "pptm"],
            SourceFormat::Hwp => &["hwpx", "hwp"],
        }
    }

    /// Lowercase format name, as used in element-stream tags.
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Word => "word",
            SourceFormat::Spreadsheet => "spreadsheet",
            SourceFormat::Presentation => "presentation",
            SourceFormat::Hwp => "hwp",
        }
    }

    /// Every supported format.
    pub fn all() -> [SourceFormat; 4] {
        [
            SourceFormat::Word,
            SourceFormat::Spreadsheet,
            SourceFormat::Presentation,
            SourceFormat::Hwp,
        ]
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What kind of unit a section represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// A flowing body or page
    #[default]
    Page,
    /// A presentation slide
    Slide,
    /// A spreadsheet sheet
    Sheet,
}

impl SectionKind {
    /// Markdown heading level of the section label.
    pub fn heading_level(&self) -> usize {
        match self {
            SectionKind::Page | SectionKind::Slide => 2,
            SectionKind::Sheet => 3,
        }
    }
}

/// One page, slide or sheet: an ordered container of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Label rendered as the section heading (`None` = no heading)
    pub label: Option<String>,

    /// Unit kind
    #[serde(default)]
    pub kind: SectionKind,

    /// Content blocks in reading order
    pub blocks: Vec<Block>,

    /// Speaker notes (slides only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Section {
    /// Create a labeled section.
    pub fn new(label: impl Into<String>, kind: SectionKind, blocks: Vec<Block>) -> Self {
        Self {
            label: Some(label.into()),
            kind,
            blocks,
            notes: None,
        }
    }

    /// Create a section without a heading.
    pub fn unlabeled(blocks: Vec<Block>) -> Self {
        Self {
            label: None,
            kind: SectionKind::Page,
            blocks,
            notes: None,
        }
    }

    /// Set speaker notes and return self.
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self
    }

    /// Check if the section has no visible blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }

    /// Number of charts in this section.
    pub fn chart_count(&self) -> usize {
        self.blocks.iter().map(Block::chart_count).sum()
    }

    /// Get plain text content of the section.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A document reconstructed from an element stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Sections in source order
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from metadata and sections.
    pub fn from_sections(mut metadata: Metadata, sections: Vec<Section>) -> Self {
        metadata.section_count = sections.len() as u32;
        Self { metadata, sections }
    }

    /// Get the number of sections in the document.
    pub fn section_count(&self) -> u32 {
        self.sections.len() as u32
    }

    /// Get a section by number (1-indexed).
    pub fn get_section(&self, number: u32) -> Option<&Section> {
        if number == 0 {
            return None;
        }
        self.sections.get((number - 1) as usize)
    }

    /// Add a section to the document.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
        self.metadata.section_count = self.sections.len() as u32;
    }

    /// Check if the document has any sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(Section::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// Source format family
    pub format: SourceFormat,

    /// Total number of sections
    pub section_count: u32,
}

impl Metadata {
    /// Create new metadata for a source format.
    pub fn with_format(format: SourceFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref author) = self.author {
            lines.push(format!("author: \"{}\"", escape_yaml(author)));
        }
        if let Some(ref subject) = self.subject {
            lines.push(format!("subject: \"{}\"", escape_yaml(subject)));
        }
        if let Some(ref keywords) = self.keywords {
            lines.push(format!("keywords: \"{}\"", escape_yaml(keywords)));
        }
        if let Some(ref creator) = self.creator {
            lines.push(format!("creator: \"{}\"", escape_yaml(creator)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        if let Some(ref modified) = self.modified {
            lines.push(format!("modified: {}", modified.to_rfc3339()));
        }

        lines.push(format!("format: {}", self.format));
        lines.push(format!("sections: {}", self.section_count));

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.section_count(), 0);
        assert!(doc.get_section(0).is_none());
    }

    #[test]
    fn test_add_section_updates_count() {
        let mut doc = Document::new();
        doc.add_section(Section::new("Slide 1", SectionKind::Slide, vec![]));
        assert_eq!(doc.metadata.section_count, 1);
        assert_eq!(
            doc.get_section(1).and_then(|s| s.label.clone()),
            Some("Slide 1".to_string())
        );
    }

    #[test]
    fn test_metadata_frontmatter() {
        let mut metadata = Metadata::with_format(SourceFormat::Presentation);
        metadata.title = Some("Quarterly \"Review\"".to_string());
        metadata.author = Some("Jane Doe".to_string());
        metadata.section_count = 12;

        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("title: \"Quarterly \\\"Review\\\"\""));
        assert!(yaml.contains("author: \"Jane Doe\""));
        assert!(yaml.contains("format: presentation"));
        assert!(yaml.contains("sections: 12"));
    }

    #[test]
    fn test_section_heading_levels() {
        assert_eq!(SectionKind::Slide.heading_level(), 2);
        assert_eq!(SectionKind::Sheet.heading_level(), 3);
    }

    #[test]
    fn test_blank_notes_dropped() {
        let section = Section::new("Slide 1", SectionKind::Slide, vec![])
            .with_notes(Some("  ".to_string()));
        assert!(section.notes.is_none());
    }
}
