//! Typed schema-to-block builders, one per source format.
//!
//! Each builder walks its element stream in document order and produces
//! [`Section`]s of [`Block`](crate::model::Block)s. Missing required nodes
//! fail fast with [`Error::Structure`](crate::Error::Structure); unresolved
//! images degrade to placeholder blocks.

mod hwp;
mod image;
mod paragraph;
mod sheet;
mod slide;
mod table;
mod word;

pub use image::resolve_image;
pub use paragraph::{heading_from_style, paragraph_block};
pub use table::table_model;

use crate::error::Result;
use crate::layout::LayoutOptions;
use crate::model::{Document, Section};
use crate::source::{ImageResolver, SourceBody, SourceDocument};
use serde::{Deserialize, Serialize};

/// Options for building the document model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Positional clustering options used for slides
    pub layout: LayoutOptions,

    /// Derive heading levels from style names and outline levels
    pub infer_headings: bool,

    /// Fail instead of falling back when a slide cannot be clustered
    pub strict: bool,

    /// Include hidden worksheets
    pub include_hidden_sheets: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            infer_headings: true,
            strict: false,
            include_hidden_sheets: false,
        }
    }
}

impl BuildOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set the slide row tolerance.
    pub fn with_row_tolerance(mut self, tolerance: i64) -> Self {
        self.layout = self.layout.with_row_tolerance(tolerance);
        self
    }

    /// Enable or disable heading inference from style names.
    pub fn with_heading_inference(mut self, infer: bool) -> Self {
        self.infer_headings = infer;
        self
    }

    /// Enable strict layout mode.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Include hidden worksheets.
    pub fn with_hidden_sheets(mut self, include: bool) -> Self {
        self.include_hidden_sheets = include;
        self
    }
}

/// State threaded through one build.
///
/// The image ordinal feeds the sequential matching strategy.
pub(crate) struct BuildContext<'a> {
    pub(crate) options: &'a BuildOptions,
    pub(crate) images: &'a dyn ImageResolver,
    image_ordinal: usize,
}

impl<'a> BuildContext<'a> {
    pub(crate) fn new(options: &'a BuildOptions, images: &'a dyn ImageResolver) -> Self {
        Self {
            options,
            images,
            image_ordinal: 0,
        }
    }

    /// Zero-based position of the next image in document order.
    pub(crate) fn next_image_ordinal(&mut self) -> usize {
        let ordinal = self.image_ordinal;
        self.image_ordinal += 1;
        ordinal
    }
}

/// Build the document model, resolving images against the stream's own
/// media table.
pub fn build_document(source: &SourceDocument, options: &BuildOptions) -> Result<Document> {
    build_document_with(source, &source.images, options)
}

/// Build the document model with an external image resolver.
pub fn build_document_with(
    source: &SourceDocument,
    images: &dyn ImageResolver,
    options: &BuildOptions,
) -> Result<Document> {
    let format = source.body.format();
    log::debug!("building {} document", format);

    let mut ctx = BuildContext::new(options, images);
    let sections: Vec<Section> = match &source.body {
        SourceBody::Word { elements } => vec![word::build_word(elements, &mut ctx)?],
        SourceBody::Spreadsheet { sheets } => sheet::build_sheets(sheets, &mut ctx)?,
        SourceBody::Presentation { slides } => slide::build_slides(slides, &mut ctx)?,
        SourceBody::Hwp { sections } => hwp::build_sections(sections, &mut ctx)?,
    };

    let mut metadata = source.metadata.clone();
    metadata.format = format;

    log::debug!("built {} section(s)", sections.len());
    Ok(Document::from_sections(metadata, sections))
}
