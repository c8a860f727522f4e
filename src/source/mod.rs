//! Element streams produced by format readers.
//!
//! A reader (ZIP + XML for the OOXML family, OWPML for HWPX) walks the
//! package and emits one of these descriptors; the builders in
//! [`crate::builder`] turn it into the unified [`Document`](crate::Document)
//! model. Descriptors are plain serde types so a stream can be produced by
//! any tool and stored as JSON.

mod common;
mod hwp;
mod sheet;
mod slide;
mod word;

pub use common::{
    ListMarker, SourceCell, SourceImage, SourceParagraph, SourceRow, SourceRun, VerticalMerge,
};
pub use hwp::{HwpElement, HwpSection};
pub use sheet::{MergeRange, SheetCell, SheetSource};
pub use slide::{ShapeContent, SlideShape, SlideSource};
pub use word::WordElement;

use crate::error::Result;
use crate::model::{Metadata, SourceFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// A complete element stream for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Core properties (`docProps/core.xml`, `header.xml`)
    #[serde(default)]
    pub metadata: Metadata,

    /// Format-specific body
    pub body: SourceBody,

    /// Extracted media, in package order
    #[serde(default)]
    pub images: ImageTable,
}

impl SourceDocument {
    /// Create a document from a body, with empty metadata and no media.
    pub fn new(body: SourceBody) -> Self {
        Self {
            metadata: Metadata::with_format(body.format()),
            body,
            images: ImageTable::default(),
        }
    }

    /// Attach the media table and return self.
    pub fn with_images(mut self, images: ImageTable) -> Self {
        self.images = images;
        self
    }

    /// Decode an element stream from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode an element stream from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Decode an element stream from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Decode an element stream from a JSON file without blocking.
    #[cfg(feature = "async")]
    pub async fn from_path_async(path: impl AsRef<Path>) -> Result<Self> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&json)
    }

    /// Encode the element stream as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Format family of the body.
    pub fn format(&self) -> SourceFormat {
        self.body.format()
    }
}

/// Format-specific body of an element stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum SourceBody {
    /// DOCX body elements
    Word {
        /// Body elements in document order
        #[serde(default)]
        elements: Vec<WordElement>,
    },

    /// XLSX worksheets
    Spreadsheet {
        /// Sheets in workbook order
        #[serde(default)]
        sheets: Vec<SheetSource>,
    },

    /// PPTX slides
    Presentation {
        /// Slides in presentation order
        #[serde(default)]
        slides: Vec<SlideSource>,
    },

    /// HWPX sections
    Hwp {
        /// Section parts in document order
        #[serde(default)]
        sections: Vec<HwpSection>,
    },
}

impl SourceBody {
    /// Format family of this body.
    pub fn format(&self) -> SourceFormat {
        match self {
            SourceBody::Word { .. } => SourceFormat::Word,
            SourceBody::Spreadsheet { .. } => SourceFormat::Spreadsheet,
            SourceBody::Presentation { .. } => SourceFormat::Presentation,
            SourceBody::Hwp { .. } => SourceFormat::Hwp,
        }
    }
}

/// Maps in-document image identifiers to extracted file paths.
///
/// Implementations never fail loudly: a miss returns `None` and the
/// builder falls through to its next lookup.
pub trait ImageResolver: Send + Sync {
    /// Look up by in-document identifier.
    fn resolve(&self, id: &str) -> Option<String>;

    /// Look up by the file name of the media part.
    fn resolve_file_name(&self, _file_name: &str) -> Option<String> {
        None
    }

    /// Look up the n-th extracted image (zero-based), in package order.
    fn resolve_nth(&self, _index: usize) -> Option<String> {
        None
    }
}

/// One extracted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// In-document identifier
    pub id: String,
    /// Path of the extracted file
    pub path: String,
}

/// Extracted images in package order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageTable {
    entries: Vec<ImageEntry>,
}

impl ImageTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn insert(&mut self, id: impl Into<String>, path: impl Into<String>) {
        self.entries.push(ImageEntry {
            id: id.into(),
            path: path.into(),
        });
    }

    /// Append an entry and return self.
    pub fn with(mut self, id: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(id, path);
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in package order.
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }
}

fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

impl ImageResolver for ImageTable {
    fn resolve(&self, id: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.path.clone())
    }

    fn resolve_file_name(&self, file_name: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|e| file_name_of(&e.path).eq_ignore_ascii_case(file_name))
            .map(|e| e.path.clone())
    }

    fn resolve_nth(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(|e| e.path.clone())
    }
}

impl ImageResolver for HashMap<String, String> {
    fn resolve(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }

    fn resolve_file_name(&self, file_name: &str) -> Option<String> {
        self.values()
            .find(|path| file_name_of(path).eq_ignore_ascii_case(file_name))
            .cloned()
    }
}

impl<F> ImageResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resolve(&self, id: &str) -> Option<String> {
        self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_format_tag() {
        let json = r#"{"body":{"format":"presentation","slides":[]}}"#;
        let doc = SourceDocument::from_json(json).unwrap();
        assert_eq!(doc.format(), SourceFormat::Presentation);
        assert!(doc.images.is_empty());
    }

    #[test]
    fn test_word_elements_decode() {
        let json = r#"{
            "body": {
                "format": "word",
                "elements": [
                    {"element": "paragraph", "runs": [{"text": "Hi", "bold": true}]},
                    {"element": "table"},
                    {"element": "image", "id": "rId7", "alt": "Logo"},
                    {"element": "divider"}
                ]
            },
            "images": [{"id": "rId7", "path": "media/image1.png"}]
        }"#;
        let doc = SourceDocument::from_json(json).unwrap();
        let SourceBody::Word { elements } = &doc.body else {
            panic!("expected word body");
        };
        assert_eq!(elements.len(), 4);
        assert!(matches!(elements[1], WordElement::Table { rows: None }));
        assert_eq!(doc.images.resolve("rId7").as_deref(), Some("media/image1.png"));
    }

    #[test]
    fn test_invalid_stream_is_json_error() {
        let err = SourceDocument::from_json(r#"{"body":{"format":"pdf"}}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn test_image_table_lookups() {
        let table = ImageTable::new()
            .with("rId2", "out/media/image1.png")
            .with("rId3", "out/media/image2.jpeg");

        assert_eq!(table.resolve("rId3").as_deref(), Some("out/media/image2.jpeg"));
        assert_eq!(
            table.resolve_file_name("IMAGE1.PNG").as_deref(),
            Some("out/media/image1.png")
        );
        assert_eq!(table.resolve_nth(1).as_deref(), Some("out/media/image2.jpeg"));
        assert!(table.resolve("rId9").is_none());
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |id: &str| (id == "a").then(|| "a.png".to_string());
        assert_eq!(resolver.resolve("a").as_deref(), Some("a.png"));
        assert!(resolver.resolve_nth(0).is_none());
    }

    #[test]
    fn test_round_trip_json() {
        let doc = SourceDocument::new(SourceBody::Hwp {
            sections: vec![HwpSection::new(vec![HwpElement::Equation {
                script: "a over b".into(),
            }])],
        });
        let json = doc.to_json(false).unwrap();
        assert!(json.contains("\"format\":\"hwp\""));
        assert_eq!(SourceDocument::from_json(&json).unwrap(), doc);
    }
}
