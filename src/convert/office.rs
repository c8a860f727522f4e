//! Converter for the office formats (DOCX, XLSX, PPTX, HWPX).

use crate::builder::build_document;
use crate::error::{Error, Result};
use crate::model::{Document, SourceFormat};
use crate::render::{to_json, to_markdown, to_markdown_with_stats, to_text, ExtractionStats, JsonFormat};
use crate::source::SourceDocument;

use super::{ConvertOptions, ConvertResult, DocumentConverter, OutputFormat};

/// Element-stream converter for one source format.
///
/// Builds the unified model with the format's builder, then renders to
/// Markdown, plain text, or JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfficeConverter {
    format: SourceFormat,
}

impl OfficeConverter {
    /// Create a converter for a source format.
    pub fn new(format: SourceFormat) -> Self {
        Self { format }
    }

    fn convert_document(&self, doc: Document, options: &ConvertOptions) -> Result<ConvertResult> {
        let metadata = doc.metadata.clone();
        let mime_type = options.output_format.mime_type();

        match options.output_format {
            OutputFormat::Markdown => {
                if options.collect_stats {
                    let render_result = to_markdown_with_stats(&doc, &options.render)?;
                    Ok(ConvertResult::new(render_result.content, metadata)
                        .with_stats(render_result.stats)
                        .with_mime_type(mime_type))
                } else {
                    let content = to_markdown(&doc, &options.render)?;
                    Ok(ConvertResult::new(content, metadata).with_mime_type(mime_type))
                }
            }
            OutputFormat::Text | OutputFormat::Json => {
                let content = if options.output_format == OutputFormat::Text {
                    to_text(&doc, &options.render)?
                } else {
                    to_json(&doc, JsonFormat::Pretty)?
                };
                let mut result = ConvertResult::new(content, metadata).with_mime_type(mime_type);
                if options.collect_stats {
                    result = result.with_stats(ExtractionStats::from_document(&doc));
                }
                Ok(result)
            }
        }
    }
}

impl DocumentConverter for OfficeConverter {
    fn format(&self) -> SourceFormat {
        self.format
    }

    fn supported_extensions(&self) -> &[&str] {
        self.format.extensions()
    }

    fn name(&self) -> &str {
        self.format.name()
    }

    fn convert(&self, source: &SourceDocument, options: &ConvertOptions) -> Result<ConvertResult> {
        if source.format() != self.format {
            return Err(Error::UnsupportedFormat(format!(
                "{} converter cannot handle a {} element stream",
                self.format,
                source.format()
            )));
        }

        let doc = build_document(source, &options.build)?;
        log::debug!("{}: converting {} section(s)", self.name(), doc.section_count());
        self.convert_document(doc, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET_JSON: &str = r#"{
        "metadata": {"title": "Budget"},
        "body": {"format": "spreadsheet", "sheets": [
            {"name": "Q1", "cells": [
                {"row": 0, "col": 0, "text": "Item"},
                {"row": 0, "col": 1, "text": "Cost"},
                {"row": 1, "col": 0, "text": "Rent"},
                {"row": 1, "col": 1, "text": "900"}
            ]}
        ]}
    }"#;

    #[test]
    fn test_converter_metadata() {
        let converter = OfficeConverter::new(SourceFormat::Spreadsheet);
        assert_eq!(converter.name(), "spreadsheet");
        assert!(converter.supports_extension("xlsx"));
        assert!(!converter.supports_extension("docx"));
    }

    #[test]
    fn test_convert_markdown_with_stats() {
        let converter = OfficeConverter::new(SourceFormat::Spreadsheet);
        let options = ConvertOptions::new().with_stats(true);
        let result = converter.convert_bytes(SHEET_JSON.as_bytes(), &options).unwrap();

        assert_eq!(result.mime_type, "text/markdown");
        assert!(result.content.starts_with("### Q1"));
        assert!(result.content.contains("| Rent | 900 |"));
        assert_eq!(result.metadata.title.as_deref(), Some("Budget"));
        assert_eq!(result.stats.unwrap().table_count, 1);
    }

    #[test]
    fn test_convert_text_and_json() {
        let converter = OfficeConverter::new(SourceFormat::Spreadsheet);
        let source = SourceDocument::from_json(SHEET_JSON).unwrap();

        let text = converter
            .convert(&source, &ConvertOptions::new().with_format(OutputFormat::Text))
            .unwrap();
        assert_eq!(text.mime_type, "text/plain");
        assert!(text.content.contains("Rent"));

        let json = converter
            .convert(
                &source,
                &ConvertOptions::new().with_format(OutputFormat::Json).with_stats(true),
            )
            .unwrap();
        assert_eq!(json.mime_type, "application/json");
        assert!(json.content.contains("\"kind\": \"table\""));
        assert_eq!(json.stats.unwrap().section_count, 1);
    }

    #[test]
    fn test_format_mismatch() {
        let converter = OfficeConverter::new(SourceFormat::Word);
        let err = converter
            .convert_bytes(SHEET_JSON.as_bytes(), &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
