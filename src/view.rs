//! Derived views over the backing store: sort, then filter, then paginate.
//!
//! The pipeline works on vectors of global row indices, so every rendered
//! row knows exactly which backing-store slot it came from regardless of how
//! the view reordered or dropped rows.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};
use crate::table::{Row, TableStore};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Header click: the ascending column flips to descending, anything else
    /// (re)starts ascending.
    pub fn toggle(&mut self, key: &str) {
        let direction = if self.key.as_deref() == Some(key)
            && self.direction == SortDirection::Ascending
        {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.key = Some(key.to_string());
        self.direction = direction;
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub sort: SortConfig,
    pub search_term: String,
    current_page: usize,
    rows_per_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            sort: SortConfig::default(),
            search_term: String::new(),
            current_page: 1,
            rows_per_page: 5,
        }
    }
}

impl ViewState {
    pub fn new(rows_per_page: usize) -> GridResult<Self> {
        let mut view = ViewState::default();
        view.set_rows_per_page(rows_per_page)?;
        Ok(view)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Does not reset the current page.
    pub fn set_rows_per_page(&mut self, n: usize) -> GridResult<()> {
        if n == 0 {
            return Err(GridError::InvalidPageSize);
        }
        self.rows_per_page = n;
        Ok(())
    }

    /// Does not reset the current page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn sort_by(&mut self, key: &str) {
        self.sort.toggle(key);
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Advances only while rows remain past the current page.
    pub fn next_page(&mut self, filtered_len: usize) -> bool {
        if self.current_page.saturating_mul(self.rows_per_page) < filtered_len {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps straight to a page; callers may land past the end and see an
    /// empty page.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }
}

/// A rendered row tagged with its position in the backing store.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewRow<'a> {
    pub global_index: usize,
    pub row: &'a Row,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page<'a> {
    pub rows: Vec<ViewRow<'a>>,
    pub filtered_len: usize,
    pub current_page: usize,
    pub rows_per_page: usize,
}

impl Page<'_> {
    pub fn has_next(&self) -> bool {
        self.current_page.saturating_mul(self.rows_per_page) < self.filtered_len
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn ids(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.row.id).collect()
    }
}

/// Global indices in sort order. Sorting is stable, so ties keep
/// backing-store order in both directions.
pub fn sort_indices(store: &TableStore, sort: &SortConfig) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..store.row_count()).collect();
    let Some(key) = sort.key.as_deref() else {
        return indices;
    };
    let Some(col) = store.column_index(key) else {
        return indices;
    };
    let rows = store.rows();
    indices.sort_by(|&a, &b| {
        let ord = rows[a].value(col).cmp(&rows[b].value(col));
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    indices
}

/// Keeps rows where any column value contains `term`, ignoring case.
pub fn filter_indices(store: &TableStore, indices: Vec<usize>, term: &str) -> Vec<usize> {
    if term.is_empty() {
        return indices;
    }
    let needle = term.to_lowercase();
    let rows = store.rows();
    indices
        .into_iter()
        .filter(|&i| {
            rows[i]
                .values
                .iter()
                .any(|v| v.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn paginate(indices: &[usize], page: usize, rows_per_page: usize) -> &[usize] {
    let start = page.saturating_sub(1).saturating_mul(rows_per_page);
    if start >= indices.len() {
        return &[];
    }
    let end = start.saturating_add(rows_per_page).min(indices.len());
    &indices[start..end]
}

/// Sorted and filtered indices, before pagination.
pub fn filtered_indices(store: &TableStore, view: &ViewState) -> Vec<usize> {
    let sorted = sort_indices(store, &view.sort);
    filter_indices(store, sorted, &view.search_term)
}

pub fn render<'a>(store: &'a TableStore, view: &ViewState) -> Page<'a> {
    let filtered = filtered_indices(store, view);
    let rows = paginate(&filtered, view.current_page, view.rows_per_page)
        .iter()
        .map(|&i| ViewRow {
            global_index: i,
            row: &store.rows()[i],
        })
        .collect::<Vec<_>>();
    debug!(
        "rendered page {} ({} of {} filtered rows)",
        view.current_page,
        rows.len(),
        filtered.len()
    );
    Page {
        rows,
        filtered_len: filtered.len(),
        current_page: view.current_page,
        rows_per_page: view.rows_per_page,
    }
}
