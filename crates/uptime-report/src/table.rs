//! Fixed-width console table.
//!
//! Columns are padded to their widest cell and separated by ` | `.

use crate::error::ReportResult;
use crate::row::{row_cells, COLUMN_COUNT, TABLE_HEADER};
use std::io::Write;
use uptime_scoring::ValidatorScore;

const SEPARATOR: &str = " | ";

/// Write the score table, header first, rows in the given order.
pub fn write_table<W: Write>(out: &mut W, scores: &[ValidatorScore]) -> ReportResult<()> {
    let rows: Vec<Vec<String>> = scores.iter().map(row_cells).collect();

    let mut widths = [0usize; COLUMN_COUNT];
    for (i, title) in TABLE_HEADER.iter().enumerate() {
        widths[i] = title.chars().count();
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    write_line(out, TABLE_HEADER.iter().copied(), &widths)?;
    for row in &rows {
        write_line(out, row.iter().map(String::as_str), &widths)?;
    }
    out.flush()?;

    Ok(())
}

fn write_line<'a, W, I>(out: &mut W, cells: I, widths: &[usize; COLUMN_COUNT]) -> ReportResult<()>
where
    W: Write,
    I: Iterator<Item = &'a str>,
{
    let line = cells
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}
