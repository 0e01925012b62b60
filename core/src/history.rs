use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Undo stack of move results, counting how many were popped.
///
/// Nothing is filtered on push, callers decide which results are worth undoing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistoryStack {
    entries: Vec<MoveResult>,
    pop_count: usize,
}

impl MoveHistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: MoveResult) {
        self.entries.push(result);
    }

    pub fn pop(&mut self) -> Result<MoveResult> {
        let result = self.entries.pop().ok_or(GameError::EmptyHistory)?;
        self.pop_count += 1;
        Ok(result)
    }

    pub fn peek(&self) -> Option<&MoveResult> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn pop_count(&self) -> usize {
        self.pop_count
    }
}
