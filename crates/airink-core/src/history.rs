//! Bounded snapshot history for undo/redo.

/// Maximum number of undo states to keep.
pub const MAX_HISTORY: usize = 50;

/// Something whose full state can be captured and put back.
pub trait Restorable {
    type Snapshot;

    /// Capture the current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replace the current state with a captured one.
    fn restore(&mut self, snapshot: &Self::Snapshot);

    /// Reset to the empty state.
    fn clear(&mut self);
}

/// Linear undo/redo history over snapshots of a [`Restorable`] target.
///
/// The cursor points at the entry matching the target's current state.
/// `None` is the blank state reached by undoing past the first entry.
#[derive(Debug, Clone)]
pub struct History<S> {
    entries: Vec<S>,
    cursor: Option<usize>,
    capacity: usize,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl<S> History<S> {
    /// Create an empty history. A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current entry, or `None` when blank.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.next_index() < self.entries.len()
    }

    /// Number of undo calls that would change the target.
    pub fn undo_depth(&self) -> usize {
        self.next_index()
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }

    /// Record the target's current state as a new entry.
    ///
    /// Entries past the cursor are dropped. When full, the oldest entry is
    /// evicted and can no longer be reached by undo.
    pub fn commit<T>(&mut self, target: &T)
    where
        T: Restorable<Snapshot = S>,
    {
        self.entries.truncate(self.next_index());
        self.entries.push(target.snapshot());

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = Some(self.entries.len() - 1);
        log::debug!("History commit: {}/{}", self.entries.len(), self.capacity);
    }

    /// Step back one entry. Undoing the first entry clears the target.
    /// Returns true if undo was performed, false if already blank.
    pub fn undo<T>(&mut self, target: &mut T) -> bool
    where
        T: Restorable<Snapshot = S>,
    {
        match self.cursor {
            Some(0) => {
                target.clear();
                self.cursor = None;
                true
            }
            Some(c) => {
                self.cursor = Some(c - 1);
                target.restore(&self.entries[c - 1]);
                true
            }
            None => false,
        }
    }

    /// Step forward one entry.
    /// Returns true if redo was performed, false if already at the newest entry.
    pub fn redo<T>(&mut self, target: &mut T) -> bool
    where
        T: Restorable<Snapshot = S>,
    {
        let next = self.next_index();
        match self.entries.get(next) {
            Some(snapshot) => {
                target.restore(snapshot);
                self.cursor = Some(next);
                true
            }
            None => false,
        }
    }

    /// Clear the target as one undoable action.
    ///
    /// Records the pre-clear state and the blank state, so a single undo
    /// brings the content back.
    pub fn clear<T>(&mut self, target: &mut T)
    where
        T: Restorable<Snapshot = S>,
    {
        self.commit(target);
        target.clear();
        self.commit(target);
    }
}
