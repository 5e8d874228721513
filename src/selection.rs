//! Selection state: the selected-id set and the focus layer.
//!
//! The focus layer is the group currently "drilled into"; while it is set,
//! hit testing restricts selectable targets to its descendants.

use crate::store::ShapeStore;
use crate::types::ShapeId;

/// Selection set plus focus layer. Order of ids is preserved for callers
/// that care about selection order; membership is set-like.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: Vec<ShapeId>,
    focus_layer: Option<ShapeId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_ids(&self) -> &[ShapeId] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    /// Replace the selection. Returns true when the set actually changed,
    /// so redundant calls stay observably idempotent.
    pub fn select_ids(&mut self, ids: Vec<ShapeId>) -> bool {
        let mut deduped = Vec::with_capacity(ids.len());
        for id in ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        if self.same_set(&deduped) {
            return false;
        }
        self.selected = deduped;
        true
    }

    /// Clear the selection. Returns true when it was non-empty.
    pub fn select_none(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Toggle one id's membership (shift-click semantics).
    pub fn toggle(&mut self, id: ShapeId) {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    pub fn focus_layer(&self) -> Option<ShapeId> {
        self.focus_layer
    }

    pub fn set_focus_layer(&mut self, layer: Option<ShapeId>) {
        self.focus_layer = layer;
    }

    /// Drop ids that no longer exist in the store, including a stale focus
    /// layer. Called after deletions and history restores.
    pub fn prune(&mut self, store: &ShapeStore) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| store.contains(*id));
        if let Some(layer) = self.focus_layer {
            if !store.contains(layer) {
                self.focus_layer = None;
            }
        }
        before != self.selected.len()
    }

    fn same_set(&self, ids: &[ShapeId]) -> bool {
        self.selected.len() == ids.len() && ids.iter().all(|id| self.selected.contains(id))
    }
}
