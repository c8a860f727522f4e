//! Plain text rendering.

use crate::error::Result;
use crate::model::Document;

use super::{CleanupPipeline, RenderOptions};

/// Convert a document to plain text.
///
/// Section labels appear on their own line when section headers are
/// enabled; formatting, tables and charts are flattened to text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    options.sections.validate(doc.section_count())?;

    let mut parts = Vec::new();
    for (index, section) in doc.sections.iter().enumerate() {
        if !options.sections.includes(index as u32 + 1) {
            continue;
        }
        if options.section_headers {
            if let Some(label) = section.label.as_deref() {
                parts.push(label.to_string());
            }
        }
        let body = section.plain_text();
        if !body.is_empty() {
            parts.push(body);
        }
    }

    let mut output = parts.join("\n\n");

    if let Some(ref cleanup_options) = options.cleanup {
        let pipeline = CleanupPipeline::new(cleanup_options.clone());
        output = pipeline.process(&output);
    }

    Ok(output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Section, SectionKind};

    #[test]
    fn test_to_text() {
        let mut doc = Document::new();
        doc.add_section(Section::new(
            "Slide 1",
            SectionKind::Slide,
            vec![Block::heading(1, "Hello, world!"), Block::paragraph("Second paragraph.")],
        ));

        let result = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(result, "Slide 1\n\nHello, world!\n\nSecond paragraph.");
    }

    #[test]
    fn test_to_text_selection() {
        let mut doc = Document::new();
        doc.add_section(Section::new("A", SectionKind::Sheet, vec![Block::paragraph("one")]));
        doc.add_section(Section::new("B", SectionKind::Sheet, vec![Block::paragraph("two")]));

        let options = RenderOptions::default()
            .with_section_range(2..=2)
            .with_section_headers(false);
        assert_eq!(to_text(&doc, &options).unwrap(), "two");
    }
}
