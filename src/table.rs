use log::debug;
use serde::{Deserialize, Serialize};

use crate::format::CellFormat;
use crate::validation::ColumnType;

/// One column of the schema. `key` is the stable identifier edits and sorts
/// refer to, `label` is what gets displayed.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Column {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub kind: ColumnType,
    #[serde(default)]
    pub format: Option<CellFormat>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            label: label.into(),
            kind: ColumnType::Text,
            format: None,
        }
    }

    /// Header-derived column: key and label are the same trimmed text.
    pub fn from_header(header: &str) -> Self {
        let header = header.trim();
        Column::new(header, header)
    }
}

/// A row record. `values` is positional and always holds exactly one slot per
/// column of the owning store.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Row {
    pub id: u64,
    pub values: Vec<String>,
}

impl Row {
    pub fn empty(id: u64, width: usize) -> Self {
        Row {
            id,
            values: vec![String::new(); width],
        }
    }

    pub fn value(&self, col: usize) -> Option<&str> {
        self.values.get(col).map(String::as_str)
    }
}

/// Backing store: the ordered schema plus the ordered rows.
///
/// Every view of the grid is derived from this struct and nothing else
/// mutates rows behind its back.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TableStore {
    columns: Vec<Column>,
    rows: Vec<Row>,
    next_id: u64,
}

impl Default for TableStore {
    fn default() -> Self {
        TableStore {
            columns: Vec::new(),
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with three empty columns and one empty row, the state a fresh
    /// grid opens with.
    pub fn with_placeholder() -> Self {
        let columns = (1..=3)
            .map(|n| Column::new(format!("column{}", n), format!("Column {}", n)))
            .collect();
        let mut store = TableStore {
            columns,
            rows: Vec::new(),
            next_id: 1,
        };
        store.add_row();
        store
    }

    /// Builds a store from parts. Rows are padded or truncated to the schema
    /// width; ids are renumbered `1..=N`.
    pub fn from_parts(columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows: Vec<Row> = rows
            .into_iter()
            .enumerate()
            .map(|(i, mut values)| {
                values.resize(width, String::new());
                Row {
                    id: i as u64 + 1,
                    values,
                }
            })
            .collect();
        let next_id = rows.len() as u64 + 1;
        TableStore {
            columns,
            rows,
            next_id,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Position of the first column with this key.
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn column_mut(&mut self, key: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.key == key)
    }

    pub fn get(&self, row: usize, key: &str) -> Option<&str> {
        let col = self.column_index(key)?;
        self.rows.get(row)?.value(col)
    }

    /// Appends an empty row and returns its id.
    pub fn add_row(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(Row::empty(id, self.columns.len()));
        id
    }

    /// Appends a synthesized column and backfills every row with an empty
    /// value. Returns the new key.
    pub fn add_column(&mut self) -> String {
        let n = self.columns.len() + 1;
        let key = format!("column_{}", n);
        self.columns
            .push(Column::new(key.clone(), format!("New column {}", n)));
        for row in &mut self.rows {
            row.values.push(String::new());
        }
        debug_assert!(self.is_consistent());
        key
    }

    /// Overwrites one cell. Returns `false` without touching anything when the
    /// row index or the column is out of range.
    pub fn set_cell(&mut self, row: usize, key: &str, value: impl Into<String>) -> bool {
        match self.column_index(key) {
            Some(col) => self.set_cell_at(row, col, value),
            None => {
                debug!("set_cell: unknown column {:?}", key);
                false
            }
        }
    }

    pub fn set_cell_at(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        if col >= self.columns.len() {
            debug!("set_cell: column {} out of range ({} columns)", col, self.columns.len());
            return false;
        }
        match self.rows.get_mut(row) {
            Some(r) => {
                r.values[col] = value.into();
                true
            }
            None => {
                debug!("set_cell: row {} out of range ({} rows)", row, self.rows.len());
                false
            }
        }
    }

    /// Removes every row whose id is listed. Ids are never handed out again.
    pub fn remove_rows(&mut self, ids: &[u64]) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| !ids.contains(&r.id));
        before - self.rows.len()
    }

    /// Every row holds exactly one value per column.
    pub fn is_consistent(&self) -> bool {
        let width = self.columns.len();
        self.rows.iter().all(|r| r.values.len() == width)
    }

    /// Headers followed by rows as plain string arrays.
    pub fn to_arrays(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.columns.iter().map(|c| c.label.clone()).collect());
        out.extend(self.rows.iter().map(|r| r.values.clone()));
        out
    }
}

