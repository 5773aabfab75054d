//! Linear undo/redo history of design snapshots.

use crate::components::DesignSnapshot;

/// Ordered log of snapshots with a cursor on the active one.
///
/// `entries[0]` is always the empty design and `cursor` always points at an
/// existing entry. Recording a new snapshot drops everything after the cursor,
/// so the history never branches.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<DesignSnapshot>,
    cursor: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// Create a history holding only the empty design.
    pub fn new() -> Self {
        Self {
            entries: vec![DesignSnapshot::new()],
            cursor: 0,
        }
    }

    /// The active snapshot.
    pub fn current(&self) -> &DesignSnapshot {
        &self.entries[self.cursor]
    }

    /// Truncate any redo branch and make `snapshot` the active entry.
    pub fn record(&mut self, snapshot: DesignSnapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor += 1;
    }

    /// Step back one entry.
    /// Returns true if the cursor moved, false if already at the start.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry.
    /// Returns true if the cursor moved, false if already at the end.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries, including the initial empty design.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the initial empty design is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if it exists.
    pub fn entry(&self, index: usize) -> Option<&DesignSnapshot> {
        self.entries.get(index)
    }
}
