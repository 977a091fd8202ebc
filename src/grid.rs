//! The grid controller: one backing store plus the view, selection, editing
//! and history state around it. Every front-end event maps to one method.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::clipboard::{Clipboard, CopiedCell, KeyInput, Shortcut};
use crate::edit::{EditState, PasteOutcome, paste_block};
use crate::error::{GridError, GridResult};
use crate::format::CellFormat;
use crate::history::History;
use crate::ingest::parse_table;
use crate::selection::RowSelection;
use crate::table::TableStore;
use crate::validation::ColumnType;
use crate::view::{self, Page, ViewState};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub rows_per_page: usize,
    /// Page sizes a front-end should offer.
    pub page_size_options: Vec<usize>,
    pub history_limit: usize,
    /// Start with three empty columns and one empty row instead of nothing.
    pub seed_placeholder: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows_per_page: 5,
            page_size_options: vec![5, 10, 15],
            history_limit: 100,
            seed_placeholder: true,
        }
    }
}

impl GridConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> GridResult<Self> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| GridError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        let config: GridConfig =
            serde_json::from_str(&text).map_err(|e| GridError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.rows_per_page == 0 || self.page_size_options.contains(&0) {
            return Err(GridError::InvalidPageSize);
        }
        Ok(())
    }
}

pub struct DataGrid {
    store: TableStore,
    view: ViewState,
    selection: RowSelection,
    edit: EditState,
    history: History,
    copied: Option<CopiedCell>,
    config: GridConfig,
}

impl DataGrid {
    pub fn new(config: GridConfig) -> GridResult<Self> {
        config.validate()?;
        let store = if config.seed_placeholder {
            TableStore::with_placeholder()
        } else {
            TableStore::new()
        };
        Ok(DataGrid {
            view: ViewState::new(config.rows_per_page)?,
            history: History::new(&store, config.history_limit),
            store,
            selection: RowSelection::default(),
            edit: EditState::default(),
            copied: None,
            config,
        })
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn copied(&self) -> Option<&CopiedCell> {
        self.copied.as_ref()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The rows of the current page, each tagged with its global index.
    pub fn page(&self) -> Page<'_> {
        view::render(&self.store, &self.view)
    }

    pub fn filtered_len(&self) -> usize {
        view::filtered_indices(&self.store, &self.view).len()
    }

    /// Value as it should be displayed, honouring the column's format.
    pub fn display_value(&self, row: usize, key: &str) -> Option<String> {
        let value = self.store.get(row, key)?;
        let column = self.store.column(key)?;
        Some(match column.format {
            Some(format) => format.apply(value),
            None => value.to_string(),
        })
    }

    /// Replaces the whole table with pasted text. Empty text leaves every
    /// piece of state alone.
    pub fn paste(&mut self, text: &str) -> GridResult<()> {
        let store = parse_table(text)?;
        self.replace_store(store);
        Ok(())
    }

    /// Installs a freshly ingested or imported table.
    pub fn replace_store(&mut self, store: TableStore) {
        info!(
            "table replaced: {} columns, {} rows",
            store.column_count(),
            store.row_count()
        );
        self.store = store;
        self.view.reset_page();
        self.selection.clear();
        self.edit.end();
        self.history.record(&self.store);
    }

    pub fn double_click(&mut self, row: usize, key: &str) {
        self.edit.begin(row, key);
    }

    pub fn blur(&mut self) {
        self.edit.end();
    }

    /// Commits an inline edit. The value is stored as typed, untrimmed.
    /// Returns `Ok(false)` when the target is out of range.
    pub fn change_cell(&mut self, row: usize, key: &str, value: &str) -> GridResult<bool> {
        let Some(column) = self.store.column(key) else {
            return Ok(false);
        };
        if !column.kind.validate(value) {
            warn!("rejected {:?} for {} column {}", value, column.kind, key);
            return Err(GridError::Validation {
                column: key.to_string(),
                kind: column.kind,
                value: value.to_string(),
            });
        }
        let changed = self.store.set_cell(row, key, value);
        if changed {
            self.history.record(&self.store);
        }
        Ok(changed)
    }

    /// Multi-cell paste anchored at a cell. Ends inline editing.
    pub fn paste_at(&mut self, row: usize, key: &str, text: &str) -> PasteOutcome {
        let outcome = paste_block(&mut self.store, row, key, text);
        if outcome.changed() {
            self.history.record(&self.store);
        }
        self.edit.end();
        outcome
    }

    pub fn sort_click(&mut self, key: &str) {
        self.view.sort_by(key);
    }

    pub fn search(&mut self, term: &str) {
        self.view.set_search(term);
    }

    pub fn set_page_size(&mut self, n: usize) -> GridResult<()> {
        self.view.set_rows_per_page(n)
    }

    pub fn next_page(&mut self) -> bool {
        let filtered = self.filtered_len();
        self.view.next_page(filtered)
    }

    pub fn prev_page(&mut self) -> bool {
        self.view.prev_page()
    }

    pub fn select_row(&mut self, id: u64) {
        self.selection.toggle(id);
    }

    pub fn select_all(&mut self) {
        let ids = self.page().ids();
        self.selection.toggle_all(&ids);
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(&self.page().ids())
    }

    pub fn add_row(&mut self) -> u64 {
        let id = self.store.add_row();
        self.history.record(&self.store);
        id
    }

    pub fn add_column(&mut self) -> String {
        let key = self.store.add_column();
        self.history.record(&self.store);
        key
    }

    /// Deletes the checked rows and clears the selection.
    pub fn remove_selected(&mut self) -> usize {
        let removed = self.store.remove_rows(self.selection.ids());
        self.selection.clear();
        if removed > 0 {
            self.edit.end();
            self.history.record(&self.store);
        }
        removed
    }

    pub fn set_column_type(&mut self, key: &str, kind: ColumnType) -> GridResult<()> {
        let column = self
            .store
            .column_mut(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        column.kind = kind;
        self.history.record(&self.store);
        Ok(())
    }

    pub fn set_column_format(&mut self, key: &str, format: Option<CellFormat>) -> GridResult<()> {
        let column = self
            .store
            .column_mut(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        column.format = format;
        self.history.record(&self.store);
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.store = snapshot.clone();
                self.edit.end();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.store = snapshot.clone();
                self.edit.end();
                true
            }
            None => false,
        }
    }

    /// Copies the focused cell. A clipboard failure is logged; the copied
    /// slot is still recorded so an in-grid paste keeps working.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard) -> Option<&CopiedCell> {
        let (row, key) = self.edit.focus()?;
        let value = self.store.get(row, key)?.to_string();
        if let Err(e) = clipboard.write_text(&value) {
            warn!("copy: {}", e);
        }
        self.copied = Some(CopiedCell {
            value,
            row,
            column: key.to_string(),
        });
        self.copied.as_ref()
    }

    /// Keyboard entry point. Shortcuts act on the focused cell only and are
    /// ignored while nothing is focused. Returns whether the key was handled.
    pub fn handle_key(&mut self, input: KeyInput, clipboard: &mut dyn Clipboard) -> bool {
        let Some(shortcut) = input.shortcut() else {
            return false;
        };
        let Some((row, key)) = self.edit.focus() else {
            return false;
        };
        let key = key.to_string();
        match shortcut {
            Shortcut::Copy => self.copy(clipboard).is_some(),
            Shortcut::Paste => {
                let text = match clipboard.read_text() {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("paste: {}", e);
                        match &self.copied {
                            Some(copied) => copied.value.clone(),
                            None => return false,
                        }
                    }
                };
                self.paste_at(row, &key, &text);
                true
            }
        }
    }
}
