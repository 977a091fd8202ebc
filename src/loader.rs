use std::fs;
use std::path::Path;

use crate::error::{GridError, GridResult};
use crate::ingest::parse_table;
use crate::table::{Column, TableStore};

/// Build a table from header + rows arrays
///
/// The first array is the header, exactly as with pasted text: each entry is
/// trimmed and becomes a column key and label. Shorter rows are padded,
/// longer rows truncated.
///
/// # Returns
/// * `GridResult<TableStore>` - The table, or `EmptyInput` when there is no header
pub fn from_arrays(arrays: Vec<Vec<String>>) -> GridResult<TableStore> {
    let mut lines = arrays.into_iter();
    let header = lines.next().ok_or(GridError::EmptyInput)?;
    let columns: Vec<Column> = header.iter().map(|h| Column::from_header(h)).collect();
    let rows = lines
        .map(|line| line.into_iter().map(|v| v.trim().to_string()).collect())
        .collect();
    Ok(TableStore::from_parts(columns, rows))
}

/// Load a table from a tab-separated text file
///
/// # Examples
/// ```no_run
/// use datagrid::loader::from_tsv_path;
///
/// match from_tsv_path("data.tsv") {
///     Ok(store) => println!("Loaded {} rows", store.row_count()),
///     Err(e) => eprintln!("Error loading TSV: {}", e),
/// }
/// ```
pub fn from_tsv_path(path: impl AsRef<Path>) -> GridResult<TableStore> {
    let text = fs::read_to_string(path.as_ref()).map_err(|e| GridError::Import(e.to_string()))?;
    parse_table(&text)
}

/// Load a table from a CSV file
///
/// Records may have differing lengths; the first record is the header.
pub fn from_csv_path(path: impl AsRef<Path>) -> GridResult<TableStore> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path.as_ref())?;
    let mut arrays = Vec::new();
    for record in reader.records() {
        arrays.push(record?.iter().map(str::to_string).collect());
    }
    from_arrays(arrays)
}

/// Load a table from XLSX bytes
///
/// Reads the first worksheet as an array of arrays and treats its first row
/// as the header, so an imported workbook lands in the same representation
/// as pasted text.
///
/// # Arguments
/// * `bytes` - Raw workbook content
///
/// # Returns
/// * `GridResult<TableStore>` - The imported table or an import error
#[cfg(feature = "xlsx")]
pub fn from_xlsx_bytes(bytes: &[u8]) -> GridResult<TableStore> {
    use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
    use std::io::Cursor;

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| GridError::Import("No sheets found in workbook".to_string()))??;

    let arrays: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();

    let store = from_arrays(arrays)?;
    log::info!(
        "imported {} columns x {} rows from xlsx",
        store.column_count(),
        store.row_count()
    );
    Ok(store)
}

/// Load a table from an XLSX file on disk
#[cfg(feature = "xlsx")]
pub fn from_xlsx_path(path: impl AsRef<Path>) -> GridResult<TableStore> {
    let bytes = fs::read(path.as_ref()).map_err(|e| GridError::Import(e.to_string()))?;
    from_xlsx_bytes(&bytes)
}
