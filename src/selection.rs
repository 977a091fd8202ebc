use serde::{Deserialize, Serialize};

/// Checked rows, by row id, in the order they were checked.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct RowSelection {
    ids: Vec<u64>,
}

impl RowSelection {
    pub fn toggle(&mut self, id: u64) {
        if let Some(pos) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    /// Header checkbox. Clears when the selection is as large as the page,
    /// otherwise selects exactly the page.
    pub fn toggle_all(&mut self, page_ids: &[u64]) {
        if self.ids.len() == page_ids.len() {
            self.ids.clear();
        } else {
            self.ids = page_ids.to_vec();
        }
    }

    pub fn all_selected(&self, page_ids: &[u64]) -> bool {
        !page_ids.is_empty() && self.ids.len() == page_ids.len()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
