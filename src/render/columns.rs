//! Side-by-side layout rows as Markdown tables.

use super::table::render_table;
use super::TableOptions;
use crate::model::{Block, CellData, TableModel};

/// Render a layout row as a table with one column per element group.
///
/// The header is `Column 1 .. Column N`; the single data row holds each
/// column's blocks, rendered by `render_block` and joined with `<br>`.
pub fn render_columns<F>(columns: &[Vec<Block>], options: &TableOptions, mut render_block: F) -> String
where
    F: FnMut(&Block) -> String,
{
    if columns.is_empty() {
        return String::new();
    }

    let header = (1..=columns.len())
        .map(|n| CellData::text(format!("Column {}", n)))
        .collect();

    let body = columns
        .iter()
        .map(|blocks| {
            let parts: Vec<String> = blocks
                .iter()
                .map(&mut render_block)
                .map(|md| md.trim().to_string())
                .filter(|md| !md.is_empty())
                .collect();
            CellData::text(parts.join("<br>"))
        })
        .collect();

    render_table(&TableModel::from_rows(vec![header, body]), options)
}
