//! Undo history as a stack of named checkpoints over document snapshots.
//!
//! A state node calls `mark` once at the start of a gesture that will
//! produce undoable mutations; `undo_to` rolls the document back to exactly
//! that point when the gesture is cancelled. Labels exist for debuggability,
//! not uniqueness. Plain `undo`/`redo` step across checkpoints.

use crate::constants::MAX_HISTORY_MARKS;
use crate::selection::SelectionManager;
use crate::store::ShapeStore;
use tracing::debug;

/// Snapshot of everything a checkpoint restores.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub shapes: ShapeStore,
    pub selection: SelectionManager,
}

/// Handle to a checkpoint. Holding a stale handle is fine; rolling back to
/// one is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    seq: u64,
}

#[derive(Debug, Clone)]
struct Checkpoint {
    seq: u64,
    label: String,
    doc: Document,
}

/// Checkpoint stack with a bounded capacity and a redo stack.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<Checkpoint>,
    redo: Vec<Checkpoint>,
    next_seq: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_count(&self) -> usize {
        self.undo.len()
    }

    /// Open a checkpoint capturing the current document. Clears the redo
    /// stack: new work prunes any redo branch.
    pub fn mark(&mut self, label: &str, doc: Document) -> Mark {
        self.next_seq += 1;
        let seq = self.next_seq;
        debug!(label, seq, "history mark");
        self.undo.push(Checkpoint {
            seq,
            label: label.to_string(),
            doc,
        });
        if self.undo.len() > MAX_HISTORY_MARKS {
            self.undo.remove(0);
        }
        self.redo.clear();
        Mark { seq }
    }

    /// Roll back to the state captured at `mark`, discarding everything
    /// after it. Unknown or already-discarded marks restore nothing.
    pub fn undo_to(&mut self, mark: Mark) -> Option<Document> {
        if !self.undo.iter().any(|c| c.seq == mark.seq) {
            return None;
        }
        while let Some(checkpoint) = self.undo.pop() {
            if checkpoint.seq == mark.seq {
                debug!(label = %checkpoint.label, seq = checkpoint.seq, "history rollback");
                self.redo.clear();
                return Some(checkpoint.doc);
            }
        }
        None
    }

    /// Step back one checkpoint. `current` is pushed onto the redo stack.
    pub fn undo(&mut self, current: Document) -> Option<Document> {
        let checkpoint = self.undo.pop()?;
        self.next_seq += 1;
        self.redo.push(Checkpoint {
            seq: self.next_seq,
            label: checkpoint.label.clone(),
            doc: current,
        });
        Some(checkpoint.doc)
    }

    /// Step forward one checkpoint. `current` returns to the undo stack.
    pub fn redo(&mut self, current: Document) -> Option<Document> {
        let checkpoint = self.redo.pop()?;
        self.next_seq += 1;
        self.undo.push(Checkpoint {
            seq: self.next_seq,
            label: checkpoint.label.clone(),
            doc: current,
        });
        Some(checkpoint.doc)
    }
}
