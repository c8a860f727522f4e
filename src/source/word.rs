//! Word-processing element stream.

use super::{SourceImage, SourceParagraph, SourceRow};
use crate::model::ChartModel;
use serde::{Deserialize, Serialize};

/// One body-level element of a word-processing document, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum WordElement {
    /// A paragraph
    Paragraph(SourceParagraph),

    /// A table; `rows` is absent when the reader found no row nodes
    Table {
        /// Table rows
        #[serde(default)]
        rows: Option<Vec<SourceRow>>,
    },

    /// An inline or anchored picture
    Image(SourceImage),

    /// An embedded chart
    Chart {
        /// Parsed chart part
        chart: ChartModel,
    },

    /// A horizontal rule
    Divider,

    /// An explicit page break
    PageBreak,
}
