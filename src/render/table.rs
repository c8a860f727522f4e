//! GitHub-flavored Markdown tables.

use super::style::emphasize;
use super::TableOptions;
use crate::model::{Alignment, CellData, TableModel};

/// Width center- and right-aligned cells are padded to.
pub const MIN_CELL_WIDTH: usize = 10;

/// Spaces appended per extra column a cell spans.
pub const SPAN_PADDING: usize = 3;

/// Render a table to GFM pipe syntax.
///
/// The first row is the header. Every output line, including the last,
/// ends with `\n`; a table with `n` rows yields `n + 1` lines. Short rows
/// are padded with empty cells. An empty table renders as `""`.
/// Single-column tables keep their outer pipes even without borders.
pub fn render_table(table: &TableModel, options: &TableOptions) -> String {
    if table.is_empty() {
        return String::new();
    }

    let rows = table.padded_rows();
    let width = rows.first().map_or(0, Vec::len);
    let alignments = column_alignments(&rows);
    let borders = options.show_borders || width == 1;

    let mut output = String::new();
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(column, cell)| cell_within(cell, options, width - column))
            .collect();
        push_line(&mut output, &cells, borders);

        if i == 0 {
            let markers: Vec<&str> = alignments
                .iter()
                .map(|align| separator_marker(*align, options.preserve_alignment))
                .collect();
            push_separator(&mut output, &markers, borders);
        }
    }
    output
}

fn push_line(output: &mut String, cells: &[String], borders: bool) {
    if borders {
        output.push('|');
        for cell in cells {
            output.push(' ');
            output.push_str(cell);
            output.push_str(" |");
        }
    } else {
        output.push_str(&cells.join(" | "));
    }
    output.push('\n');
}

/// `|:--- |:---: |` with borders, `:--- | :---:` without.
fn push_separator(output: &mut String, markers: &[&str], borders: bool) {
    if borders {
        output.push('|');
        for marker in markers {
            output.push_str(marker);
            output.push_str(" |");
        }
    } else {
        output.push_str(&markers.join(" | "));
    }
    output.push('\n');
}

/// Column alignment taken from the header row.
fn column_alignments(rows: &[Vec<CellData>]) -> Vec<Alignment> {
    rows.first()
        .map(|header| header.iter().map(|cell| cell.style.alignment).collect())
        .unwrap_or_default()
}

fn separator_marker(alignment: Alignment, preserve: bool) -> &'static str {
    if !preserve {
        return "---";
    }
    match alignment {
        Alignment::Center => ":---:",
        Alignment::Right => "---:",
        Alignment::Left | Alignment::Justify => ":---",
    }
}

/// Render one cell's content, without the surrounding pipes.
pub fn render_cell(cell: &CellData, options: &TableOptions) -> String {
    cell_within(cell, options, cell.col_span as usize)
}

/// Render a cell whose span padding covers at most `columns_left` columns.
fn cell_within(cell: &CellData, options: &TableOptions, columns_left: usize) -> String {
    if cell.merged {
        return String::new();
    }

    let text = escape_cell_text(cell.text.trim());
    let mut content = emphasize(&text, cell.style.bold, cell.style.italic);

    if options.preserve_alignment {
        content = pad_aligned(&content, cell.style.alignment);
    }

    let span = (cell.col_span as usize).min(columns_left);
    if span > 1 {
        content.push_str(&" ".repeat((span - 1) * SPAN_PADDING));
    }

    if options.preserve_colors {
        if let Some(color) = cell.style.background_color.as_deref().filter(|c| !c.is_empty()) {
            content.push_str(&format!(" <!-- bg:{} -->", color));
        }
    }

    content
}

/// Escape unescaped pipes and turn line breaks into `<br>`.
pub fn escape_cell_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut result = String::with_capacity(text.len());
    let mut backslashes = 0usize;

    for c in text.chars() {
        match c {
            '|' if backslashes % 2 == 0 => result.push_str("\\|"),
            '\n' => result.push_str("<br>"),
            _ => result.push(c),
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
    }
    result
}

fn pad_aligned(content: &str, alignment: Alignment) -> String {
    let width = content.chars().count();
    if width >= MIN_CELL_WIDTH {
        return content.to_string();
    }
    let pad = MIN_CELL_WIDTH - width;

    match alignment {
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), content, " ".repeat(pad - left))
        }
        Alignment::Right => format!("{}{}", " ".repeat(pad), content),
        Alignment::Left | Alignment::Justify => content.to_string(),
    }
}
