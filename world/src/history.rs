//! Undo and redo stacks of restorable snapshots.

use furrow_core::{Action, GameSnapshot};

/// Two stacks of snapshots supporting linear undo and redo.
///
/// Every entry holds the world state as it was *before* its action, so
/// restoring an undo entry lands exactly where the action started. Walking
/// one direction pushes the state being left onto the opposite stack, tagged
/// with the same action, which keeps undo and redo mutually inverse.
#[derive(Clone, Debug, Default)]
pub struct HistoryManager {
    undo_stack: Vec<GameSnapshot>,
    redo_stack: Vec<GameSnapshot>,
}

impl HistoryManager {
    /// Creates empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly committed action and invalidates the redo stack.
    pub fn record(&mut self, snapshot: GameSnapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Pops the latest undo entry.
    ///
    /// `current` captures the state being left, tagged with the entry's
    /// action; it is pushed onto the redo stack. Returns `None` without
    /// calling `current` when nothing can be undone.
    pub fn undo<F>(&mut self, current: F) -> Option<GameSnapshot>
    where
        F: FnOnce(Action) -> GameSnapshot,
    {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current(snapshot.action));
        Some(snapshot)
    }

    /// Pops the latest redo entry, mirroring [`HistoryManager::undo`].
    pub fn redo<F>(&mut self, current: F) -> Option<GameSnapshot>
    where
        F: FnOnce(Action) -> GameSnapshot,
    {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current(snapshot.action));
        Some(snapshot)
    }

    /// Number of entries that can be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries that can be redone.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Entries that can be undone, oldest first.
    #[must_use]
    pub fn undo_stack(&self) -> &[GameSnapshot] {
        &self.undo_stack
    }

    /// Entries that can be redone, oldest first.
    #[must_use]
    pub fn redo_stack(&self) -> &[GameSnapshot] {
        &self.redo_stack
    }

    /// Forgets every entry.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
