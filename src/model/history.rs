/// Maximum number of undo steps retained.
pub const MAX_HISTORY: usize = 64;

/// Undo/redo stacks over snapshots of some state.
///
/// The history never reads global state: the caller hands in the current
/// value on every call and receives the value to restore.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl<T: Clone + PartialEq> History<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current` before it gets replaced. Clears the redo stack.
    pub fn push(&mut self, current: T) {
        if self.undo_stack.last() == Some(&current) {
            return;
        }
        self.undo_stack.push(current);
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
