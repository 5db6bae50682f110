//! Terminal rendering of query results.
//!
//! Writes an aligned, `=`-underlined table to any writer, so tests can
//! render into a buffer.

use std::io::{self, Write};

use crate::skyserver::QueryResult;

/// Minimum rendered column width.
const MIN_COL_WIDTH: usize = 8;

/// Gap between columns.
const GAP: &str = "  ";

/// Renders a query result as an aligned table with a trailing row count.
pub fn render_table(out: &mut impl Write, result: &QueryResult) -> io::Result<()> {
    if result.is_empty() {
        writeln!(out, "Query returned no results")?;
        return Ok(());
    }

    let widths = column_widths(result);

    let header: Vec<String> = result
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, &w)| format!("{name:<w$}"))
        .collect();
    writeln!(out, "{}", header.join(GAP).trim_end())?;

    let rule: Vec<String> = widths.iter().map(|w| "=".repeat(*w)).collect();
    writeln!(out, "{}", rule.join(GAP))?;

    for row in &result.rows {
        let cells: Vec<String> = row
            .values()
            .iter()
            .zip(&widths)
            .map(|(value, &w)| format!("{value:<w$}"))
            .collect();
        writeln!(out, "{}", cells.join(GAP).trim_end())?;
    }

    writeln!(out, "Query returned {} objects", result.row_count)?;
    Ok(())
}

fn column_widths(result: &QueryResult) -> Vec<usize> {
    result
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let cells = result
                .rows
                .iter()
                .map(|row| row.values()[i].len())
                .max()
                .unwrap_or(0);
            name.len().max(cells).max(MIN_COL_WIDTH)
        })
        .collect()
}
