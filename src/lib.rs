//! # unoffice
//!
//! Layout-aware document model reconstruction and Markdown rendering for
//! Office (DOCX, XLSX, PPTX) and HWPX documents.
//!
//! A format reader hands the library an element stream (a
//! [`SourceDocument`], usually stored as JSON). Per-format builders turn it
//! into a unified [`Document`] of sections and blocks, which renders to
//! Markdown, plain text, or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unoffice::{load_file, render};
//!
//! fn main() -> unoffice::Result<()> {
//!     // Build the document model from an element stream
//!     let doc = load_file("deck.pptx.json")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Four source schemas**: word-processing, spreadsheet, slide and OWPML streams
//! - **Tables**: merged cells, alignment and fill colors carried to Markdown
//! - **Slide layout**: positional clustering into rows and side-by-side columns
//! - **Charts**: rendered as numbered data tables
//! - **Parallel rendering**: Uses Rayon for documents with many sections
//! - **Cleanup pipeline**: Unicode and whitespace normalization

pub mod builder;
pub mod convert;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod source;
pub mod strategy;

// Re-export commonly used types
pub use builder::{build_document, build_document_with, BuildOptions};
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, OfficeConverter,
    OutputFormat,
};
pub use error::{Error, Result};
pub use layout::{LayoutOptions, PositionalClusterer};
pub use model::{
    Alignment, Block, CellData, ChartModel, ChartSeries, ChartType, Document, Metadata, Position,
    Section, SectionKind, SourceFormat, StyleAttributes, TableModel,
};
pub use render::{
    CleanupOptions, CleanupPreset, JsonFormat, RenderOptions, RenderSession, SectionSelection,
    TableOptions,
};
pub use source::{ImageResolver, ImageTable, SourceBody, SourceDocument};

use std::io::Read;
use std::path::Path;

/// Load an element-stream file and build the document model.
///
/// # Example
///
/// ```no_run
/// use unoffice::load_file;
///
/// let doc = load_file("report.docx.json").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_file_with_options(path, &BuildOptions::default())
}

/// Load an element-stream file with custom build options.
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: &BuildOptions) -> Result<Document> {
    let source = SourceDocument::from_path(path)?;
    build_document(&source, options)
}

/// Build the document model from a JSON element stream.
pub fn load_json(json: &str) -> Result<Document> {
    let source = SourceDocument::from_json(json)?;
    build_document(&source, &BuildOptions::default())
}

/// Build the document model from a reader yielding a JSON element stream.
pub fn load_reader<R: Read>(reader: R) -> Result<Document> {
    let source = SourceDocument::from_reader(reader)?;
    build_document(&source, &BuildOptions::default())
}

/// Load an element-stream file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn load_file_async<P: AsRef<Path>>(path: P, options: &BuildOptions) -> Result<Document> {
    let source = SourceDocument::from_path_async(path).await?;
    build_document(&source, options)
}

/// Extract plain text from an element-stream file.
///
/// # Example
///
/// ```no_run
/// use unoffice::extract_text;
///
/// let text = extract_text("budget.xlsx.json").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    Ok(doc.plain_text())
}

/// Convert an element-stream file to Markdown.
///
/// # Example
///
/// ```no_run
/// use unoffice::to_markdown;
///
/// let markdown = to_markdown("deck.pptx.json").unwrap();
/// std::fs::write("deck.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert an element-stream file to Markdown with custom options.
///
/// # Example
///
/// ```no_run
/// use unoffice::{to_markdown_with_options, CleanupPreset, RenderOptions};
///
/// let options = RenderOptions::new()
///     .with_frontmatter(true)
///     .with_cleanup_preset(CleanupPreset::Aggressive);
/// let markdown = to_markdown_with_options("deck.pptx.json", &options).unwrap();
/// ```
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = load_file(path)?;
    render::to_markdown(&doc, options)
}

/// Convert an element-stream file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = load_file(path)?;
    render::to_text(&doc, options)
}

/// Convert an element-stream file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = load_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for building and rendering documents.
///
/// # Example
///
/// ```no_run
/// use unoffice::Unoffice;
///
/// let markdown = Unoffice::new()
///     .with_frontmatter()
///     .with_notes()
///     .with_row_tolerance(200_000)
///     .load("deck.pptx.json")?
///     .to_markdown()?;
/// # Ok::<(), unoffice::Error>(())
/// ```
pub struct Unoffice {
    build_options: BuildOptions,
    render_options: RenderOptions,
}

impl Unoffice {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            build_options: BuildOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Fail instead of falling back when a slide layout cannot be clustered.
    pub fn strict(mut self) -> Self {
        self.build_options = self.build_options.strict();
        self
    }

    /// Set the vertical tolerance for grouping slide shapes into rows.
    pub fn with_row_tolerance(mut self, tolerance: i64) -> Self {
        self.build_options = self.build_options.with_row_tolerance(tolerance);
        self
    }

    /// Include hidden worksheets.
    pub fn with_hidden_sheets(mut self) -> Self {
        self.build_options = self.build_options.with_hidden_sheets(true);
        self
    }

    /// Disable parallel rendering.
    pub fn sequential(mut self) -> Self {
        self.render_options = self.render_options.with_parallel(false);
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Render speaker notes.
    pub fn with_notes(mut self) -> Self {
        self.render_options = self.render_options.with_notes(true);
        self
    }

    /// Set the prefix prepended to resolved image paths.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_image_prefix(prefix);
        self
    }

    /// Set table rendering options.
    pub fn with_table_options(mut self, table: TableOptions) -> Self {
        self.render_options = self.render_options.with_table_options(table);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Set section selection.
    pub fn with_sections(mut self, sections: SectionSelection) -> Self {
        self.render_options = self.render_options.with_sections(sections);
        self
    }

    /// Load an element-stream file and build its document.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<UnofficeResult> {
        let source = SourceDocument::from_path(path)?;
        self.build(&source)
    }

    /// Build a document from a decoded element stream.
    pub fn build(self, source: &SourceDocument) -> Result<UnofficeResult> {
        let document = build_document(source, &self.build_options)?;
        Ok(UnofficeResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Build a document, resolving images with an external resolver.
    pub fn build_with(
        self,
        source: &SourceDocument,
        images: &dyn ImageResolver,
    ) -> Result<UnofficeResult> {
        let document = build_document_with(source, images, &self.build_options)?;
        Ok(UnofficeResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Unoffice {
    fn default() -> Self {
        Self::new()
    }
}

/// A built document together with the render options to apply.
pub struct UnofficeResult {
    /// The built document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnofficeResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text without cleanup.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = r#"{
        "body": {"format": "presentation", "slides": [
            {"number": 1, "shapes": [
                {"position": {"x": 0, "y": 0}, "content": {"element": "title", "text": "Kickoff"}}
            ], "notes": "welcome everyone"},
            {"number": 2, "shapes": []}
        ]}
    }"#;

    #[test]
    fn test_unoffice_builder() {
        let builder = Unoffice::new()
            .strict()
            .with_frontmatter()
            .with_cleanup(CleanupPreset::Standard);

        assert!(builder.build_options.strict);
        assert!(builder.render_options.include_frontmatter);
        assert!(builder.render_options.cleanup.is_some());
    }

    #[test]
    fn test_unoffice_builder_default() {
        let builder = Unoffice::default();
        assert!(!builder.render_options.include_frontmatter);
        assert!(builder.render_options.parallel);
        assert!(!builder.build_options.strict);
    }

    #[test]
    fn test_unoffice_builder_chained() {
        let builder = Unoffice::new()
            .with_row_tolerance(1_000)
            .with_hidden_sheets()
            .with_notes()
            .with_image_prefix("./media/")
            .sequential();

        assert_eq!(builder.build_options.layout.row_tolerance, 1_000);
        assert!(builder.build_options.include_hidden_sheets);
        assert!(builder.render_options.include_notes);
        assert_eq!(builder.render_options.image_path_prefix, "./media/");
        assert!(!builder.render_options.parallel);
    }

    #[test]
    fn test_load_json_invalid() {
        assert!(matches!(load_json("not json"), Err(Error::Json(_))));
        assert!(load_json(r#"{"body":{"format":"pdf"}}"#).is_err());
    }

    #[test]
    fn test_build_and_render_deck() {
        let source = SourceDocument::from_json(DECK).unwrap();
        let result = Unoffice::new().with_notes().build(&source).unwrap();

        let markdown = result.to_markdown().unwrap();
        assert_eq!(
            markdown,
            "## Slide 1\n\n### Kickoff\n\n> **Notes:** welcome everyone\n\n## Slide 2\n\n*No content*"
        );
        assert_eq!(result.plain_text(), "Kickoff");
        assert_eq!(result.document().section_count(), 2);
    }

    #[test]
    fn test_load_reader() {
        let doc = load_reader(DECK.as_bytes()).unwrap();
        assert_eq!(doc.metadata.format, SourceFormat::Presentation);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_load_file_async() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, DECK.as_bytes()).unwrap();

        let doc = load_file_async(file.path(), &BuildOptions::default())
            .await
            .unwrap();
        assert_eq!(doc.section_count(), 2);
    }
}
