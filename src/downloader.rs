use crate::error::GridResult;
use crate::table::TableStore;

/// Convert the table to tab-separated text
///
/// Produces the same shape ingestion accepts: a header line of column labels
/// followed by one line per row. Pasting the result back yields an equal
/// table as long as no value contains a tab or newline.
///
/// # Arguments
/// * `store` - Table to serialise
///
/// # Returns
/// * `String` - Tab-separated text, newline-terminated lines
///
/// # Examples
/// ```
/// use datagrid::ingest::parse_table;
/// use datagrid::downloader::to_tsv;
///
/// let store = parse_table("a\tb\n1\t2").unwrap();
/// assert_eq!(to_tsv(&store), "a\tb\n1\t2\n");
/// ```
pub fn to_tsv(store: &TableStore) -> String {
    let mut out = String::new();
    for line in store.to_arrays() {
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}

/// Convert the table to CSV format
///
/// Header row of column labels, then the rows. Quoting of commas, quotes and
/// newlines is left to the `csv` writer.
///
/// # Arguments
/// * `store` - Table to serialise
///
/// # Returns
/// * `GridResult<String>` - CSV content or a CSV error
pub fn to_csv(store: &TableStore) -> GridResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for line in store.to_arrays() {
        writer.write_record(&line)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::error::GridError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| crate::error::GridError::Csv(e.to_string()))
}

/// Convert the table to XLSX format
///
/// Writes a single worksheet named `Sheet1`: column labels in bold on the
/// first row, then one row per record. Values that parse as finite numbers
/// are written as numbers, everything else as text.
///
/// # Arguments
/// * `store` - Table to serialise
///
/// # Returns
/// * `GridResult<Vec<u8>>` - XLSX file content as bytes or an export error
#[cfg(feature = "xlsx")]
pub fn to_xlsx(store: &TableStore) -> GridResult<Vec<u8>> {
    use rust_xlsxwriter::{Format, Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Sheet1")?;

    let header = Format::new().set_bold();
    for (c, column) in store.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, c as u16, &column.label, &header)?;
    }

    for (r, row) in store.rows().iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, value) in row.values.iter().enumerate() {
            let c = c as u16;
            match value.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => worksheet.write_number(r, c, n)?,
                _ => worksheet.write_string(r, c, value)?,
            };
        }
    }

    workbook.push_worksheet(worksheet);
    let buffer = workbook.save_to_buffer()?;

    log::info!(
        "exported {} rows to xlsx ({} bytes)",
        store.row_count(),
        buffer.len()
    );
    Ok(buffer)
}

/// Write the XLSX export straight to a file.
#[cfg(feature = "xlsx")]
pub fn save_xlsx(store: &TableStore, path: impl AsRef<std::path::Path>) -> GridResult<()> {
    let bytes = to_xlsx(store)?;
    std::fs::write(path, bytes).map_err(|e| crate::error::GridError::Export(e.to_string()))
}
