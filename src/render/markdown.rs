//! Markdown assembly for reconstructed documents.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{Block, Document, RichText, Section, StyleAttributes};

use super::chart::render_chart;
use super::columns::render_columns;
use super::style::{
    decorate_paragraph, emphasize, escape_markdown, heading_prefix, link_destination, list_prefix,
    render_rich_text,
};
use super::table::render_table;
use super::{CleanupPipeline, ExtractionStats, RenderOptions, RenderResult, RenderSession};

/// Body emitted for a section without visible blocks.
pub const NO_CONTENT: &str = "*No content*";

/// Marker used in place of an image whose file could not be resolved.
pub const IMAGE_NOT_FOUND: &str = "image-not-found";

/// Sections below this count are rendered sequentially.
const PARALLEL_THRESHOLD: usize = 4;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
///
/// The renderer itself is immutable; all per-pass state lives in a
/// [`RenderSession`] so sections can be rendered concurrently.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let (content, _) = self.render_internal(doc)?;
        Ok(content)
    }

    /// Render a document to Markdown with extraction statistics.
    pub fn render_with_stats(&self, doc: &Document) -> Result<RenderResult> {
        let (content, mut stats) = self.render_internal(doc)?;
        stats.count_text(&content);
        Ok(RenderResult::new(content, doc.metadata.clone(), stats))
    }

    fn render_internal(&self, doc: &Document) -> Result<(String, ExtractionStats)> {
        self.options.sections.validate(doc.section_count())?;

        let selected: Vec<&Section> = doc
            .sections
            .iter()
            .enumerate()
            .filter(|(i, _)| self.options.sections.includes(*i as u32 + 1))
            .map(|(_, section)| section)
            .collect();

        // Chart numbers continue across sections, so each section starts
        // from the number of charts in the sections before it.
        let mut offsets = Vec::with_capacity(selected.len());
        let mut running = 0u32;
        for section in &selected {
            offsets.push(running);
            running += section.chart_count() as u32;
        }

        let render_one = |(section, offset): (&Section, u32)| {
            let mut session = RenderSession::with_chart_offset(offset);
            let markdown = self.render_section(section, &mut session);
            let stats = self.section_stats(section);
            (markdown, stats)
        };

        let rendered: Vec<(String, ExtractionStats)> =
            if self.options.parallel && selected.len() >= PARALLEL_THRESHOLD {
                log::debug!("rendering {} sections in parallel", selected.len());
                selected
                    .par_iter()
                    .copied()
                    .zip(offsets.par_iter().copied())
                    .map(render_one)
                    .collect()
            } else {
                selected
                    .iter()
                    .copied()
                    .zip(offsets.iter().copied())
                    .map(render_one)
                    .collect()
            };

        let mut output = String::new();
        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
            output.push('\n');
        }

        let mut stats = ExtractionStats::new();
        for (markdown, section_stats) in rendered {
            output.push_str(&markdown);
            stats.merge(&section_stats);
        }

        if let Some(ref cleanup_options) = self.options.cleanup {
            let pipeline = CleanupPipeline::new(cleanup_options.clone());
            output = pipeline.process(&output);
        }

        Ok((output.trim().to_string(), stats))
    }

    fn section_stats(&self, section: &Section) -> ExtractionStats {
        let mut stats = ExtractionStats::new();
        if self.options.collect_stats {
            stats.add_section();
            for block in &section.blocks {
                stats.add_block(block);
            }
        }
        stats
    }

    /// Render one section.
    ///
    /// Emits the section heading (when labeled), then every non-empty
    /// block followed by a blank line. A section with no visible block
    /// gets the `*No content*` placeholder so it stays visible.
    pub fn render_section(&self, section: &Section, session: &mut RenderSession) -> String {
        let mut output = String::new();

        if self.options.section_headers {
            if let Some(label) = section.label.as_deref() {
                output.push_str(&"#".repeat(section.kind.heading_level()));
                output.push(' ');
                output.push_str(label);
                output.push_str("\n\n");
            }
        }

        let mut emitted = 0usize;
        for block in &section.blocks {
            let markdown = self.render_block(block, session);
            let markdown = markdown.trim_end();
            if markdown.trim().is_empty() {
                continue;
            }
            output.push_str(markdown);
            output.push_str("\n\n");
            emitted += 1;
        }

        if emitted == 0 {
            output.push_str(NO_CONTENT);
            output.push_str("\n\n");
        }

        if self.options.include_notes {
            if let Some(notes) = section.notes.as_deref() {
                output.push_str(&render_notes(notes));
            }
        }

        output
    }

    /// Render one block without trailing separator.
    pub fn render_block(&self, block: &Block, session: &mut RenderSession) -> String {
        match block {
            Block::Heading { level, text } => {
                let level = (*level).min(self.options.max_heading_level);
                format!("{}{}", heading_prefix(level), self.escape(text.trim()))
            }
            Block::Paragraph { text, style } => self.render_paragraph(text, style),
            Block::ListItem {
                text,
                level,
                ordered,
                style,
            } => {
                let body = render_rich_text(text, self.options.escape_special_chars);
                let body = emphasize(body.trim(), style.bold, style.italic);
                format!("{}{}", list_prefix(*level, *ordered), body)
            }
            Block::Table { table } => {
                session.next_table();
                render_table(table, &self.options.table)
            }
            Block::Image {
                path,
                source_id,
                alt_text,
            } => {
                session.next_image();
                self.render_image(path.as_deref(), source_id, alt_text)
            }
            Block::ChartRef { chart } => {
                let ordinal = session.next_chart();
                render_chart(chart, ordinal)
            }
            Block::Divider => "---".to_string(),
            Block::Columns { columns } => {
                if columns.len() == 1 {
                    return columns[0]
                        .iter()
                        .map(|b| self.render_block(b, session))
                        .filter(|md| !md.trim().is_empty())
                        .collect::<Vec<_>>()
                        .join("\n\n");
                }
                render_columns(columns, &self.options.table, |b| self.render_block(b, session))
            }
        }
    }

    fn render_paragraph(&self, text: &RichText, style: &StyleAttributes) -> String {
        let body = render_rich_text(text, self.options.escape_special_chars);
        let body = body.trim();
        if body.is_empty() {
            return String::new();
        }

        decorate_paragraph(
            body,
            style,
            self.options.infer_headings,
            self.options.max_heading_level,
        )
    }

    fn render_image(&self, path: Option<&str>, source_id: &str, alt_text: &str) -> String {
        let alt = alt_text.replace(['[', ']'], "");
        match path {
            Some(path) => {
                let target = format!("{}{}", self.options.image_path_prefix, path);
                format!("![{}]({})", alt, link_destination(&target))
            }
            None => {
                log::debug!("image '{}' has no resolved path", source_id);
                format!("*[{}: {}]*", IMAGE_NOT_FOUND, escape_markdown(source_id))
            }
        }
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Speaker notes as a block quote.
fn render_notes(notes: &str) -> String {
    let mut lines = notes.trim().lines();
    let mut output = format!("> **Notes:** {}", lines.next().unwrap_or_default().trim());
    for line in lines {
        output.push_str("\n> ");
        output.push_str(line.trim());
    }
    output.push_str("\n\n");
    output
}
