//! Rendering of the unified document model to Markdown, text and JSON.

mod chart;
mod cleanup;
mod columns;
mod json;
mod markdown;
mod options;
mod result;
mod session;
pub mod style;
mod table;
mod text;

pub use chart::{format_number, pie_table, render_chart, series_table, NO_CHART_DATA};
pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use columns::render_columns;
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer, IMAGE_NOT_FOUND, NO_CONTENT};
pub use options::{RenderOptions, SectionSelection, TableOptions};
pub use result::{ExtractionStats, RenderResult};
pub use session::RenderSession;
pub use table::{escape_cell_text, render_cell, render_table, MIN_CELL_WIDTH, SPAN_PADDING};
pub use text::to_text;
