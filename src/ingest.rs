//! Tab-separated paste parsing.
//!
//! Clipboard text copied out of a spreadsheet arrives as newline-separated
//! records with tab-separated fields. There is no quoting, so a literal tab
//! or newline inside a field cannot be represented.

use log::info;

use crate::error::{GridError, GridResult};
use crate::table::{Column, TableStore};

/// Splits text into lines of raw (untrimmed) cells.
///
/// Empty text has no lines. A single terminating newline, as spreadsheet
/// applications append when copying, does not produce an extra blank line.
pub fn parse_lines(text: &str) -> Vec<Vec<&str>> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n').map(|line| line.split('\t').collect()).collect()
}

/// Builds a fresh table from pasted text. The first line is the header;
/// every other line becomes a row with ids `1..=N`.
pub fn parse_table(text: &str) -> GridResult<TableStore> {
    let lines = parse_lines(text);
    let Some((header, data)) = lines.split_first() else {
        return Err(GridError::EmptyInput);
    };

    let columns: Vec<Column> = header.iter().map(|h| Column::from_header(h)).collect();
    let width = columns.len();

    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|line| {
            (0..width)
                .map(|c| line.get(c).map(|v| v.trim().to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    info!("ingested {} columns x {} rows", width, rows.len());
    Ok(TableStore::from_parts(columns, rows))
}
