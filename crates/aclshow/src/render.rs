//! Fixed-width text table layout.
//!
//! Produces the "simple" layout used by the SONiC show commands:
//!
//! ```text
//! Name       Type    Binding      Description    Stage    Status
//! ---------  ------  -----------  -------------  -------  --------
//! DATAACL_5  L3      Ethernet20   DATAACL_5      ingress  Active
//!                    Ethernet124
//! ```
//!
//! Widths are computed once over the header and every row. Rows are laid
//! out in the order given; nothing is sorted or filtered here.

use crate::rows::Row;

/// Extra width every column gets over its header text.
pub const MIN_PADDING: usize = 2;

/// Separator placed between adjacent columns.
pub const COLUMN_SEPARATOR: &str = "  ";

/// Horizontal alignment of a column (header included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

impl Alignment {
    fn pad(&self, cell: &str, width: usize) -> String {
        match self {
            Alignment::Left => format!("{:<width$}", cell, width = width),
            Alignment::Right => format!("{:>width$}", cell, width = width),
        }
    }
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}

/// Computes the width of every column.
///
/// A column is as wide as its widest cell, but never narrower than its
/// header plus [`MIN_PADDING`]. Missing trailing cells count as empty.
pub fn column_widths(headers: &[(&str, Alignment)], rows: &[Row]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, (header, _))| {
            rows.iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell_width(cell))
                .fold(cell_width(header) + MIN_PADDING, usize::max)
        })
        .collect()
}

fn layout_line<'a>(
    cells: impl Iterator<Item = &'a str>,
    headers: &[(&str, Alignment)],
    widths: &[usize],
) -> String {
    let mut cells = cells;
    let line = headers
        .iter()
        .zip(widths)
        .map(|((_, align), width)| align.pad(cells.next().unwrap_or(""), *width))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    line.trim_end().to_string()
}

/// Renders a header row, a dash row and the data rows.
///
/// Every line is right-trimmed and the result ends with a newline. An
/// empty row set still renders the header and dash rows.
pub fn render_table(headers: &[(&str, Alignment)], rows: &[Row]) -> String {
    let widths = column_widths(headers, rows);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(layout_line(
        headers.iter().map(|(header, _)| *header),
        headers,
        &widths,
    ));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR),
    );
    for row in rows {
        lines.push(layout_line(row.iter().map(String::as_str), headers, &widths));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
