use std::collections::VecDeque;

use crate::table::TableStore;

/// Snapshot undo/redo over the whole backing store.
///
/// `cursor` points at the snapshot that matches the live store.
#[derive(Clone, Debug)]
pub struct History {
    snapshots: VecDeque<TableStore>,
    cursor: usize,
    limit: usize,
}

impl History {
    pub fn new(initial: &TableStore, limit: usize) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(initial.clone());
        History {
            snapshots,
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Records the state after a mutation and drops any redo tail.
    pub fn record(&mut self, store: &TableStore) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(store.clone());
        while self.snapshots.len() > self.limit {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn undo(&mut self) -> Option<&TableStore> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    pub fn redo(&mut self) -> Option<&TableStore> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}
