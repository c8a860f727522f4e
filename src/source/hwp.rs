//! OWPML (HWPX) element stream.

use super::{SourceImage, SourceParagraph, SourceRow};
use crate::model::ChartModel;
use serde::{Deserialize, Serialize};

/// One section part (`Contents/sectionN.xml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HwpSection {
    /// Elements in document order
    pub elements: Vec<HwpElement>,
}

impl HwpSection {
    /// Create a section from elements.
    pub fn new(elements: Vec<HwpElement>) -> Self {
        Self { elements }
    }
}

/// One element of an OWPML section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum HwpElement {
    /// A paragraph; `outline_level` carries the outline heading level
    Paragraph(SourceParagraph),

    /// A table whose cells carry explicit `cellAddr` coordinates
    Table {
        /// Table rows
        #[serde(default)]
        rows: Option<Vec<SourceRow>>,
    },

    /// A picture referencing a `binItem`
    Picture(SourceImage),

    /// An equation object
    Equation {
        /// Equation script
        script: String,
    },

    /// An embedded chart
    Chart {
        /// Parsed chart part
        chart: ChartModel,
    },
}
