use log::debug;
use serde::{Deserialize, Serialize};

use crate::ingest::parse_lines;
use crate::table::TableStore;

/// Counts of what a multi-cell paste did. The paste is applied cell by cell,
/// so a block can be partially written.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct PasteOutcome {
    pub applied: usize,
    /// Targets that fell outside the current rows or columns.
    pub out_of_bounds: usize,
    /// Values the target column's type refused.
    pub rejected: usize,
}

impl PasteOutcome {
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

/// Writes a tab/newline block into the store with its top-left corner at
/// (`row`, `column_key`). `row` is a global index.
///
/// Every cell is checked on its own: targets past the last row or column are
/// skipped, the rest are written trimmed.
pub fn paste_block(store: &mut TableStore, row: usize, column_key: &str, text: &str) -> PasteOutcome {
    let mut outcome = PasteOutcome::default();
    let lines = parse_lines(text);

    let Some(anchor_col) = store.column_index(column_key) else {
        outcome.out_of_bounds = lines.iter().map(Vec::len).sum();
        debug!("paste anchored on unknown column {:?}", column_key);
        return outcome;
    };

    let (rows, cols) = (store.row_count(), store.column_count());
    for (offset_y, cells) in lines.iter().enumerate() {
        for (offset_x, value) in cells.iter().enumerate() {
            let target = row
                .checked_add(offset_y)
                .zip(anchor_col.checked_add(offset_x))
                .filter(|&(r, c)| r < rows && c < cols);
            let Some((target_row, target_col)) = target else {
                outcome.out_of_bounds += 1;
                continue;
            };
            let value = value.trim();
            if !store.columns()[target_col].kind.validate(value) {
                outcome.rejected += 1;
                continue;
            }
            store.set_cell_at(target_row, target_col, value);
            outcome.applied += 1;
        }
    }

    debug!(
        "paste at ({}, {}): {} applied, {} out of bounds, {} rejected",
        row, column_key, outcome.applied, outcome.out_of_bounds, outcome.rejected
    );
    outcome
}

/// The single inline-editing slot. A double-click replaces whatever cell was
/// being edited; blur returns to viewing without reverting anything.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EditState {
    #[default]
    Viewing,
    Editing { row: usize, column: String },
}

impl EditState {
    pub fn begin(&mut self, row: usize, column: &str) {
        *self = EditState::Editing {
            row,
            column: column.to_string(),
        };
    }

    pub fn end(&mut self) {
        *self = EditState::Viewing;
    }

    pub fn is_editing(&self, row: usize, column: &str) -> bool {
        matches!(self, EditState::Editing { row: r, column: c } if *r == row && c == column)
    }

    /// The focused cell, if any.
    pub fn focus(&self) -> Option<(usize, &str)> {
        match self {
            EditState::Viewing => None,
            EditState::Editing { row, column } => Some((*row, column.as_str())),
        }
    }
}
