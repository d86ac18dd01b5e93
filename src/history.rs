//! Linear undo/redo over committed editor snapshots.
//!
//! DESIGN
//! ======
//! `History` owns every committed [`EditorState`]. Snapshots are moved in on
//! [`History::push`] and never handed out mutably, so a state stays frozen once
//! it is in `past` or `future`. Only commit points go through here: finished
//! drags and resizes, creation, deletion. Per-frame gesture updates and
//! viewport changes stay in the engine's live state.
//!
//! There is no branching. A push after an undo drops the redo branch.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::doc::EditorState;

/// Default cap on the number of undo steps kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Past / present / future stack of committed states.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    past: Vec<EditorState>,
    present: EditorState,
    future: VecDeque<EditorState>,
    /// Maximum length of `past`; `None` keeps everything.
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(EditorState::default())
    }
}

impl History {
    /// Start an unbounded history at `present`.
    #[must_use]
    pub fn new(present: EditorState) -> Self {
        Self { past: Vec::new(), present, future: VecDeque::new(), limit: None }
    }

    /// Start a history at `present` that keeps at most `limit` undo steps.
    ///
    /// A limit of zero means unbounded.
    #[must_use]
    pub fn with_limit(present: EditorState, limit: usize) -> Self {
        Self { limit: (limit > 0).then_some(limit), ..Self::new(present) }
    }

    /// The current committed state.
    #[must_use]
    pub fn present(&self) -> &EditorState {
        &self.present
    }

    /// Committed states before `present`, oldest first.
    #[must_use]
    pub fn past(&self) -> &[EditorState] {
        &self.past
    }

    /// Undone states, next redo first.
    pub fn future(&self) -> impl Iterator<Item = &EditorState> {
        self.future.iter()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Commit `state` as the new present. Clears the redo branch.
    pub fn push(&mut self, state: EditorState) {
        let previous = std::mem::replace(&mut self.present, state);
        self.past.push(previous);
        self.future.clear();
        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
            }
        }
    }

    /// Step back one commit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        true
    }

    /// Step forward one undone commit. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    /// Drop past and future and start over from `state`. The limit is kept.
    pub fn reset(&mut self, state: EditorState) {
        self.past.clear();
        self.future.clear();
        self.present = state;
    }
}
