//! Unified document model.
//!
//! Every format builder reduces its element stream to these types: sections
//! holding ordered blocks, with tables and charts carried as plain data.
//! Nothing here is mutated once a section is handed to a renderer.

mod block;
mod chart;
mod document;
mod primitives;
mod table;

pub use block::{Block, RichText, TextSpan};
pub use chart::{ChartModel, ChartSeries, ChartType};
pub use document::{Document, Metadata, Section, SectionKind, SourceFormat};
pub use primitives::{Alignment, Position, StyleAttributes};
pub use table::{clamp_span, CellData, TableModel};
