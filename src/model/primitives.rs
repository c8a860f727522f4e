//! Position and style primitives shared by every block type.

use serde::{Deserialize, Serialize};

/// A 2-D position in the source document's native units.
///
/// Units are EMU for slide and word-processing shapes, cell coordinates for
/// spreadsheets and pixel equivalents for HWP. Positions are only ever
/// compared within one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset
    pub x: i64,
    /// Vertical offset
    pub y: i64,
    /// Width, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    /// Height, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

impl Position {
    /// Create a position without extent.
    pub fn new(x: i64, y: i64) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
        }
    }

    /// Set the extent and return self.
    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sort key: top-to-bottom, then left-to-right.
    pub fn reading_key(&self) -> (i64, i64) {
        (self.y, self.x)
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// Parse an alignment keyword as found in OOXML/OWPML attributes.
    ///
    /// Unknown values fall back to left alignment.
    pub fn from_keyword(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "center" | "ctr" | "centre" => Alignment::Center,
            "right" | "r" | "end" => Alignment::Right,
            "justify" | "both" | "just" | "distribute" => Alignment::Justify,
            _ => Alignment::Left,
        }
    }
}

/// Character and paragraph styling attached to a block or cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Paragraph or cell alignment
    pub alignment: Alignment,

    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_pt: Option<f32>,

    /// Background fill (hex, e.g. "FFFF00" or "#FFFF00")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// Explicit heading level (1-6)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,

    /// List nesting level (0 = top level)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_level: Option<u8>,

    /// Whether the list is ordered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
}

impl StyleAttributes {
    /// Create an unstyled attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic and return self.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set alignment and return self.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set font size and return self.
    pub fn with_font_size(mut self, size_pt: f32) -> Self {
        self.font_size_pt = Some(size_pt);
        self
    }

    /// Set background color and return self.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set heading level (clamped to 1-6) and return self.
    pub fn with_heading(mut self, level: u8) -> Self {
        self.heading_level = Some(level.clamp(1, 6));
        self
    }

    /// Check if any character emphasis is applied.
    pub fn has_emphasis(&self) -> bool {
        self.bold || self.italic
    }
}
