//! Spreadsheet builder.
//!
//! Each visible sheet becomes one section: its used cell range as a
//! table, followed by the sheet's charts and pictures.

use super::image::image_block;
use super::BuildContext;
use crate::error::{Error, Result};
use crate::model::{Block, CellData, Section, SectionKind, TableModel};
use crate::source::{MergeRange, SheetCell, SheetSource};
use std::collections::HashMap;

/// Build one section per sheet, in workbook order.
pub(crate) fn build_sheets(sheets: &[SheetSource], ctx: &mut BuildContext<'_>) -> Result<Vec<Section>> {
    let mut sections = Vec::with_capacity(sheets.len());

    for (index, sheet) in sheets.iter().enumerate() {
        if sheet.hidden && !ctx.options.include_hidden_sheets {
            log::debug!("skipping hidden sheet '{}'", sheet.name);
            continue;
        }
        sections.push(build_sheet(sheet, index, ctx)?);
    }

    Ok(sections)
}

fn build_sheet(sheet: &SheetSource, index: usize, ctx: &mut BuildContext<'_>) -> Result<Section> {
    let label = if sheet.name.trim().is_empty() {
        format!("Sheet {}", index + 1)
    } else {
        sheet.name.clone()
    };

    let cells = sheet
        .cells
        .as_deref()
        .ok_or_else(|| Error::structure(format!("sheet '{}' has no cell data", label)))?;

    let mut blocks = Vec::new();

    let table = grid_table(cells, &sheet.merges);
    if !table.is_empty() {
        blocks.push(Block::table(table));
    }
    blocks.extend(sheet.charts.iter().cloned().map(Block::chart));
    for image in &sheet.images {
        blocks.push(image_block(image, ctx));
    }

    Ok(Section::new(label, SectionKind::Sheet, blocks))
}

/// Place cells on a grid spanning the used range and apply merges.
fn grid_table(cells: &[SheetCell], merges: &[MergeRange]) -> TableModel {
    let used: Vec<&SheetCell> = cells.iter().filter(|c| !c.text.trim().is_empty()).collect();
    let (Some(min_row), Some(max_row), Some(min_col), Some(max_col)) = (
        used.iter().map(|c| c.row).min(),
        used.iter().map(|c| c.row).max(),
        used.iter().map(|c| c.col).min(),
        used.iter().map(|c| c.col).max(),
    ) else {
        return TableModel::new();
    };

    let by_address: HashMap<(u32, u32), &SheetCell> =
        used.iter().map(|c| ((c.row, c.col), *c)).collect();

    let mut rows = Vec::with_capacity((max_row - min_row + 1) as usize);
    for r in min_row..=max_row {
        let mut row = Vec::new();
        let mut c = min_col;

        while c <= max_col {
            match merges.iter().find(|m| m.contains(r, c)) {
                // Merges are cut to the used range.
                Some(merge) if merge.first_row == r && merge.first_col == c => {
                    let last_col = merge.last_col.min(max_col);
                    let last_row = merge.last_row.min(max_row);
                    row.push(
                        cell_at(&by_address, r, c)
                            .colspan(i64::from(last_col - c) + 1)
                            .rowspan(i64::from(last_row - r) + 1),
                    );
                    c = last_col.saturating_add(1);
                }
                Some(merge) => {
                    let last_col = merge.last_col.min(max_col);
                    row.push(CellData::covered().colspan(i64::from(last_col - c) + 1));
                    c = last_col.saturating_add(1);
                }
                None => {
                    row.push(cell_at(&by_address, r, c));
                    c += 1;
                }
            }
        }
        rows.push(row);
    }

    TableModel::from_rows(rows)
}

fn cell_at(cells: &HashMap<(u32, u32), &SheetCell>, row: u32, col: u32) -> CellData {
    cells
        .get(&(row, col))
        .map(|cell| CellData::text(cell.text.trim()).with_style(cell.style.clone()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildOptions;
    use crate::model::{ChartModel, ChartType};
    use crate::source::ImageTable;

    fn build(sheets: &[SheetSource], options: &BuildOptions) -> Result<Vec<Section>> {
        let media = ImageTable::new();
        let mut ctx = BuildContext::new(options, &media);
        build_sheets(sheets, &mut ctx)
    }

    #[test]
    fn test_used_range_only() {
        let sheet = SheetSource::new(
            "Data",
            vec![
                SheetCell::new(2, 1, "Name"),
                SheetCell::new(2, 2, "Score"),
                SheetCell::new(3, 1, "Kim"),
                SheetCell::new(3, 2, "90"),
                SheetCell::new(9, 9, "  "),
            ],
        );
        let sections = build(&[sheet], &BuildOptions::default()).unwrap();
        assert_eq!(sections[0].label.as_deref(), Some("Data"));
        assert_eq!(sections[0].kind, SectionKind::Sheet);

        match &sections[0].blocks[0] {
            Block::Table { table } => {
                assert_eq!(table.row_count(), 2);
                assert_eq!(table.column_count(), 2);
                assert_eq!(table.rows[1][0].text, "Kim");
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_merged_range() {
        let sheet = SheetSource::new(
            "Merged",
            vec![
                SheetCell::new(0, 0, "Title"),
                SheetCell::new(1, 0, "a"),
                SheetCell::new(1, 1, "b"),
                SheetCell::new(2, 0, "c"),
                SheetCell::new(2, 2, "d"),
            ],
        )
        .with_merge(MergeRange::new(0, 0, 0, 2))
        .with_merge(MergeRange::new(1, 1, 2, 1));

        let table = grid_table(sheet.cells.as_deref().unwrap(), &sheet.merges);
        assert_eq!(table.rows[0].len(), 1);
        assert_eq!(table.rows[0][0].col_span, 3);
        assert_eq!(table.rows[1][1].row_span, 2);
        assert!(table.rows[2][1].merged);
        assert_eq!(table.rows[2][2].text, "d");
    }

    #[test]
    fn test_merge_cut_to_used_range() {
        let cells = vec![SheetCell::new(0, 0, "Total"), SheetCell::new(1, 1, "x")];
        let merges = vec![MergeRange::new(0, 0, 1_000_000, 16_000)];

        let table = grid_table(&cells, &merges);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][0].col_span, 2);
        assert_eq!(table.rows[0][0].row_span, 2);
        assert!(table.rows[1][0].merged);
        assert_eq!(table.rows[1][0].col_span, 2);
    }

    #[test]
    fn test_hidden_sheets() {
        let mut hidden = SheetSource::new("Secret", vec![SheetCell::new(0, 0, "x")]);
        hidden.hidden = true;
        let visible = SheetSource::new("", vec![]);
        let sheets = [hidden, visible];

        let sections = build(&sheets, &BuildOptions::default()).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label.as_deref(), Some("Sheet 2"));
        assert!(sections[0].blocks.is_empty());

        let all = build(&sheets, &BuildOptions::default().with_hidden_sheets(true)).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_charts_follow_table() {
        let mut sheet = SheetSource::new("Chart", vec![SheetCell::new(0, 0, "v")]);
        sheet.charts.push(ChartModel::new(ChartType::Pie, "Share"));
        let sections = build(&[sheet], &BuildOptions::default()).unwrap();
        assert!(sections[0].blocks[0].is_table());
        assert_eq!(sections[0].blocks[1].chart_count(), 1);
    }

    #[test]
    fn test_missing_cells_is_structure_error() {
        let sheet = SheetSource {
            name: "Broken".to_string(),
            ..Default::default()
        };
        let err = build(&[sheet], &BuildOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }
}
