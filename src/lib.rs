/*!
# Data Grid

A spreadsheet-like data grid engine: paste tab-separated text to build a
table, then edit, sort, search, page through and export it.

## Overview

Text copied out of a spreadsheet (tab-separated fields, newline-separated
records, first record is the header) is ingested into a **backing store** of
ordered columns and rows. Everything a user sees is a derived view of that
store, and every edit writes back into it through the row's *global index*,
its position in the unsorted, unfiltered store.

## Architecture

### Ingestion
- **ingest**: splits pasted text into lines and cells, derives the column
  schema from the header line and one row per remaining line

### Backing store
- **table**: `Column`, `Row` and `TableStore`; rows are positional records
  that always hold one value per column
- **validation**: declared column types (text, number, email, date)
- **format**: display formatters (currency, percentage, date)

### View pipeline
- **view**: sort → filter → paginate over vectors of global indices, so each
  rendered row carries the index it came from

### Editing
- **edit**: offset-targeted multi-cell paste with per-cell bounds checks, and
  the single inline-editing slot
- **history**: snapshot undo/redo
- **selection**: checked rows
- **clipboard**: clipboard access and keyboard shortcut decoding
- **grid**: `DataGrid`, the controller every front-end event goes through

### Import / export
- **downloader**: TSV, CSV and XLSX export
- **loader**: TSV, CSV and XLSX import, all through the same header-first
  representation

### Web API (feature `web`)
- **app**: axum routes, one per front-end event, plus export/import

## Error Handling

Failures are reported as [`GridError`]. Edit targets outside the table are not
errors: they are skipped and counted. Clipboard failures are logged and never
abort the operation that triggered them.
*/

pub mod clipboard;
pub mod downloader;
pub mod edit;
pub mod error;
pub mod format;
pub mod grid;
pub mod history;
pub mod ingest;
pub mod loader;
pub mod selection;
pub mod table;
pub mod validation;
pub mod view;

#[cfg(feature = "web")]
pub mod app;

/// Re-export the commonly used types to make the crate easier to use
pub use clipboard::*;
pub use edit::*;
pub use error::*;
pub use format::*;
pub use grid::*;
pub use history::*;
pub use selection::*;
pub use table::*;
pub use validation::*;
pub use view::*;
