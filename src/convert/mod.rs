//! Document converter module providing one converter per source format.
//!
//! Converters turn an element stream into rendered output. The registry
//! maps file extensions (`docx`, `xlsx`, `pptx`, `hwpx`, ...) and format
//! names to converters and dispatches element streams by their body format.
//!
//! # Example
//!
//! ```no_run
//! use unoffice::convert::{ConvertOptions, ConverterRegistry};
//! use std::path::Path;
//!
//! fn main() -> unoffice::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let result = registry.convert(Path::new("deck.pptx.json"), &ConvertOptions::default())?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod office;

pub use office::OfficeConverter;

use crate::builder::BuildOptions;
use crate::error::{Error, Result};
use crate::model::{Metadata, SourceFormat};
use crate::render::{ExtractionStats, RenderOptions};
use crate::source::SourceDocument;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Rendering options
    pub render: RenderOptions,

    /// Model building options
    pub build: BuildOptions,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set model building options.
    pub fn with_build_options(mut self, options: BuildOptions) -> Self {
        self.build = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// Plain text
    Text,

    /// JSON structure
    Json,
}

impl OutputFormat {
    /// MIME type of content in this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Text => "text/plain",
            OutputFormat::Json => "application/json",
        }
    }

    /// Conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Source document metadata
    pub metadata: Metadata,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, metadata: Metadata) -> Self {
        Self {
            content,
            metadata,
            stats: None,
            mime_type: OutputFormat::Markdown.mime_type(),
        }
    }

    /// Set extraction statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Trait for document converters.
///
/// Implement this trait to add support for a new source format.
pub trait DocumentConverter: Send + Sync {
    /// Source format handled by this converter.
    fn format(&self) -> SourceFormat;

    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert a decoded element stream.
    fn convert(&self, source: &SourceDocument, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert a JSON element stream held in memory.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let source = SourceDocument::from_reader(bytes)?;
        self.convert(&source, options)
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions and format names to converters and
/// provides convenient methods for converting element streams.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with a converter for every supported format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for format in SourceFormat::all() {
            registry.register(Arc::new(OfficeConverter::new(format)));
        }
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Get the converter for a source format.
    pub fn get_by_format(&self, format: SourceFormat) -> Option<Arc<dyn DocumentConverter>> {
        self.get_by_name(format.name())
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.converters.keys().map(|s| s.as_str()).collect()
    }

    /// Convert a decoded element stream with the converter for its format.
    pub fn convert_source(
        &self,
        source: &SourceDocument,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let format = source.format();
        let converter = self
            .get_by_format(format)
            .ok_or_else(|| Error::UnsupportedFormat(format.to_string()))?;

        converter.convert(source, options)
    }

    /// Convert a JSON element-stream file.
    ///
    /// The converter is chosen by the stream's body format, so a stream
    /// may be stored under any file name.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let source = SourceDocument::from_path(path)?;
        self.convert_source(&source, options)
    }

    /// Convert an in-memory element stream read from a file with extension `ext`.
    ///
    /// Fails when the stream's body format does not belong to the extension.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_build_options(BuildOptions::new().strict())
            .with_stats(true)
            .with_format(OutputFormat::Text);

        assert!(options.build.strict);
        assert!(options.collect_stats);
        assert_eq!(options.output_format, OutputFormat::Text);
        assert_eq!(options.output_format.mime_type(), "text/plain");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ConverterRegistry::with_defaults();
        for ext in ["docx", "XLSX", "pptx", "hwpx", "hwp"] {
            assert!(registry.supports(ext), "{} should be supported", ext);
        }
        assert!(!registry.supports("pdf"));
    }

    #[test]
    fn test_registry_get_by_extension() {
        let registry = ConverterRegistry::with_defaults();
        let converter = registry.get_by_extension("pptx");
        assert!(converter.is_some());
        assert_eq!(converter.unwrap().name(), "presentation");
    }

    #[test]
    fn test_registry_get_by_format() {
        let registry = ConverterRegistry::with_defaults();
        let converter = registry.get_by_format(SourceFormat::Hwp).unwrap();
        assert!(converter.supports_extension("HWPX"));
    }

    #[test]
    fn test_empty_registry_rejects_source() {
        let registry = ConverterRegistry::new();
        let source = SourceDocument::from_json(r#"{"body":{"format":"word","elements":[]}}"#).unwrap();
        let err = registry
            .convert_source(&source, &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
