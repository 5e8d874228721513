//! Shape arena.
//!
//! Shapes are stored by id with the parent as a non-owning relational
//! reference, which keeps "walk up to the outermost selectable ancestor" a
//! plain traversal over ids with no ownership cycles. Per-parent child lists
//! are kept sorted by z-key and define the sibling order used for rendering
//! and hit testing.

use crate::types::{ParentId, Shape, ShapeId, ZIndex};
use std::collections::HashMap;

/// Arena of shapes plus per-parent z-ordered sibling lists.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: HashMap<ShapeId, Shape>,
    children: HashMap<ParentId, Vec<ShapeId>>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Insert a shape. Returns false on a duplicate id (caller reports).
    pub fn insert(&mut self, shape: Shape) -> bool {
        if self.shapes.contains_key(&shape.id) {
            return false;
        }
        let siblings = self.children.entry(shape.parent).or_default();
        // keep the sibling list sorted by z-key
        let pos = siblings
            .iter()
            .position(|sid| {
                self.shapes
                    .get(sid)
                    .is_some_and(|s| s.z > shape.z)
            })
            .unwrap_or(siblings.len());
        siblings.insert(pos, shape.id);
        self.shapes.insert(shape.id, shape);
        true
    }

    /// Remove a shape and detach it from its parent's sibling list.
    /// Descendants are not touched; the editor removes whole subtrees.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let shape = self.shapes.remove(&id)?;
        if let Some(siblings) = self.children.get_mut(&shape.parent) {
            siblings.retain(|sid| *sid != id);
        }
        Some(shape)
    }

    /// The z-key that appends at the end of a parent's sibling list.
    pub fn next_z(&self, parent: ParentId) -> ZIndex {
        let last = self
            .children
            .get(&parent)
            .and_then(|siblings| siblings.last())
            .and_then(|sid| self.shapes.get(sid))
            .map(|s| s.z);
        ZIndex::after(last)
    }

    /// Direct children of a parent, in z-order.
    pub fn children_of(&self, parent: ParentId) -> &[ShapeId] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn parent_of(&self, id: ShapeId) -> Option<ParentId> {
        self.shapes.get(&id).map(|s| s.parent)
    }

    /// Shape ancestors of `id`, nearest first, ending below the page root.
    pub fn ancestors(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut out = Vec::new();
        let mut current = id;
        while let Some(ParentId::Shape(parent)) = self.parent_of(current) {
            out.push(parent);
            current = parent;
        }
        out
    }

    /// Whether `id` is `ancestor` or sits somewhere below it.
    pub fn is_within(&self, id: ShapeId, ancestor: ShapeId) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    /// `id` plus every descendant, depth-first.
    pub fn subtree(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut out = vec![id];
        let mut i = 0;
        while i < out.len() {
            out.extend(self.children_of(ParentId::Shape(out[i])).iter().copied());
            i += 1;
        }
        out
    }

    /// Every shape in rendering order (parents before children, siblings by
    /// z-key), paired with its global order index. Higher index draws on top.
    pub fn rendering_order(&self) -> Vec<(ShapeId, u32)> {
        let mut out = Vec::with_capacity(self.shapes.len());
        let mut stack: Vec<ShapeId> = self
            .children_of(ParentId::Page)
            .iter()
            .rev()
            .copied()
            .collect();
        let mut index = 0u32;
        while let Some(id) = stack.pop() {
            out.push((id, index));
            index += 1;
            stack.extend(self.children_of(ParentId::Shape(id)).iter().rev().copied());
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.shapes.keys().copied()
    }
}
