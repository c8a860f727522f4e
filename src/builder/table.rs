//! Table normalization for word-processing, slide and OWPML tables.
//!
//! Two source conventions are supported. Sequential tables (DOCX, PPTX)
//! list cells in grid order and mark merges with `vMerge` / `hMerge`.
//! Addressed tables (HWPX) give every cell an explicit column address and
//! omit covered cells entirely. Both become a [`TableModel`] whose covered
//! positions are `merged` placeholder cells.

use crate::error::{Error, Result};
use crate::model::{clamp_span, Alignment, CellData, StyleAttributes, TableModel};
use crate::source::{SourceCell, SourceRow, VerticalMerge};
use std::collections::HashMap;

/// Normalize source rows into a table model.
///
/// Fails with a structure error when the row list is absent.
pub fn table_model(rows: Option<&[SourceRow]>) -> Result<TableModel> {
    let rows = rows.ok_or_else(|| Error::structure("table without row list"))?;

    let addressed = rows
        .iter()
        .flat_map(|row| row.cells.iter())
        .any(|cell| cell.col.is_some());

    let model_rows = if addressed {
        addressed_rows(rows)
    } else {
        sequential_rows(rows)
    };

    let table = TableModel::from_rows(model_rows.into_iter().filter(|r| !r.is_empty()).collect());
    log::trace!(
        "table normalized: {} row(s), {} column(s), addressed={}",
        table.row_count(),
        table.column_count(),
        addressed
    );
    Ok(table)
}

/// Convert a source cell's content and formatting.
fn convert_cell(cell: &SourceCell) -> CellData {
    let text = if cell.paragraphs.is_empty() {
        cell.text.clone().unwrap_or_default()
    } else {
        cell.paragraphs
            .iter()
            .map(|p| p.plain_text().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    };

    let runs: Vec<_> = cell
        .paragraphs
        .iter()
        .flat_map(|p| p.effective_runs())
        .filter(|r| !r.text.trim().is_empty())
        .collect();

    let style = StyleAttributes {
        bold: !runs.is_empty() && runs.iter().all(|r| r.bold),
        italic: !runs.is_empty() && runs.iter().all(|r| r.italic),
        alignment: cell
            .alignment
            .or_else(|| cell.paragraphs.first().map(|p| p.alignment))
            .unwrap_or(Alignment::Left),
        background_color: cell.background.clone(),
        ..Default::default()
    };

    CellData::text(text)
        .with_style(style)
        .colspan(cell.col_span)
        .rowspan(cell.row_span)
}

fn sequential_rows(rows: &[SourceRow]) -> Vec<Vec<CellData>> {
    let width = grid_width(rows);

    // Grid column and bounded colspan of every non-hMerge cell, per row.
    let grid: Vec<Vec<(usize, i64, &SourceCell)>> = rows
        .iter()
        .map(|row| {
            let mut column = 0usize;
            row.cells
                .iter()
                .filter(|cell| !cell.h_merge)
                .map(|cell| {
                    let span = bounded(cell.col_span, width.saturating_sub(column));
                    let placed = (column, span, cell);
                    column += span as usize;
                    placed
                })
                .collect()
        })
        .collect();

    let continues_at = |row: usize, column: usize| {
        grid.get(row).is_some_and(|cells| {
            cells
                .iter()
                .any(|(c, _, cell)| *c == column && cell.v_merge == Some(VerticalMerge::Continue))
        })
    };

    grid.iter()
        .enumerate()
        .map(|(r, cells)| {
            let rows_left = grid.len() - r;
            cells
                .iter()
                .map(|&(column, span, cell)| match cell.v_merge {
                    Some(VerticalMerge::Continue) => CellData::covered().colspan(span),
                    Some(VerticalMerge::Restart) => {
                        let below = (r + 1..grid.len())
                            .take_while(|&next| continues_at(next, column))
                            .count();
                        let row_span = (below as i64 + 1).max(cell.row_span);
                        convert_cell(cell)
                            .colspan(span)
                            .rowspan(bounded(row_span, rows_left))
                    }
                    None => convert_cell(cell)
                        .colspan(span)
                        .rowspan(bounded(cell.row_span, rows_left)),
                })
                .collect()
        })
        .collect()
}

fn addressed_rows(rows: &[SourceRow]) -> Vec<Vec<CellData>> {
    // (row, column) of each position covered by a row span -> anchor colspan
    let mut covered: HashMap<(usize, usize), u32> = HashMap::new();
    let width = grid_width(rows);
    let mut result = Vec::with_capacity(rows.len());

    for (r, row) in rows.iter().enumerate() {
        let mut cells: Vec<(usize, &SourceCell)> = row
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (cell.col.map_or(i, |c| c.max(0) as usize), cell))
            .collect();
        cells.sort_by_key(|(column, _)| *column);

        let mut out = Vec::new();
        let mut column = 0usize;

        for (target, cell) in cells {
            fill_until(&mut out, &mut column, target, r, &covered);
            if column > target {
                log::warn!("row {}: cell addressed at column {} overlaps a span", r, target);
            }

            let data = convert_cell(cell)
                .colspan(bounded(cell.col_span, width.saturating_sub(column)))
                .rowspan(bounded(cell.row_span, rows.len() - r));
            for next in r + 1..r + data.row_span as usize {
                covered.insert((next, column), data.col_span);
            }
            column += data.col_span as usize;
            out.push(data);
        }

        // Trailing positions covered from above.
        let last_covered = covered
            .keys()
            .filter(|(row, _)| *row == r)
            .map(|(_, c)| *c + 1)
            .max()
            .unwrap_or(0);
        fill_until(&mut out, &mut column, last_covered, r, &covered);

        result.push(out);
    }

    result
}

/// Widest row, counting every listed cell and every column address.
fn grid_width(rows: &[SourceRow]) -> usize {
    rows.iter()
        .map(|row| {
            let addressed = row
                .cells
                .iter()
                .filter_map(|cell| cell.col)
                .map(|col| col.max(0) as usize + 1)
                .max()
                .unwrap_or(0);
            row.cells.len().max(addressed)
        })
        .max()
        .unwrap_or(0)
}

/// Clamp a span to at least 1 and at most `limit` positions.
fn bounded(span: i64, limit: usize) -> i64 {
    let limit = i64::try_from(limit.max(1)).unwrap_or(i64::MAX);
    i64::from(clamp_span(span)).min(limit)
}

/// Emit covered placeholders and empty cells until `column` reaches `target`.
fn fill_until(
    out: &mut Vec<CellData>,
    column: &mut usize,
    target: usize,
    row: usize,
    covered: &HashMap<(usize, usize), u32>,
) {
    while *column < target {
        match covered.get(&(row, *column)) {
            Some(&span) => {
                out.push(CellData::covered().colspan(span as i64));
                *column += span as usize;
            }
            None => {
                out.push(CellData::empty());
                *column += 1;
            }
        }
    }
}
