//! Presentation element stream.

use super::{SourceImage, SourceParagraph, SourceRow};
use crate::model::{ChartModel, Position};
use serde::{Deserialize, Serialize};

/// One slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideSource {
    /// One-based slide number
    pub number: u32,

    /// Shapes of the slide's shape tree, in tree order
    pub shapes: Vec<SlideShape>,

    /// Speaker notes text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SlideSource {
    /// Create a slide.
    pub fn new(number: u32, shapes: Vec<SlideShape>) -> Self {
        Self {
            number,
            shapes,
            notes: None,
        }
    }
}

/// A shape with its placement on the slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideShape {
    /// Offset and extent in EMU; absent when the shape has no `xfrm`
    #[serde(default)]
    pub position: Option<Position>,

    /// Shape content
    pub content: ShapeContent,
}

impl SlideShape {
    /// Create a positioned shape.
    pub fn at(x: i64, y: i64, content: ShapeContent) -> Self {
        Self {
            position: Some(Position::new(x, y)),
            content,
        }
    }

    /// Create a shape without placement.
    pub fn unplaced(content: ShapeContent) -> Self {
        Self {
            position: None,
            content,
        }
    }
}

/// What a shape holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum ShapeContent {
    /// Title or center-title placeholder
    Title {
        /// Title text
        text: String,
    },

    /// Any other text-bearing shape
    TextBox {
        /// Paragraphs of the text body
        #[serde(default)]
        paragraphs: Vec<SourceParagraph>,
    },

    /// Graphic-frame table
    Table {
        /// Table rows
        #[serde(default)]
        rows: Option<Vec<SourceRow>>,
    },

    /// Picture
    Picture(SourceImage),

    /// Graphic-frame chart
    Chart {
        /// Parsed chart part
        chart: ChartModel,
    },

    /// Group shape
    Group {
        /// Child shapes
        #[serde(default)]
        shapes: Vec<SlideShape>,
    },
}
