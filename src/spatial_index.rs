//! R-tree spatial index over shape bounds.
//!
//! Reduces hit-test candidate lookup from O(n) to O(log n) for point and
//! box queries. Exact containment against shape geometry happens in the hit
//! tester; entries here only carry bounding boxes.

use crate::geom::Box2;
use crate::types::ShapeId;
use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;

/// A spatial entry for one shape's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub shape_id: ShapeId,
    pub bounds: Box2,
}

impl SpatialEntry {
    pub fn new(shape_id: ShapeId, bounds: Box2) -> Self {
        Self { shape_id, bounds }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min.x, self.bounds.min.y],
            [self.bounds.max.x, self.bounds.max.y],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.shape_id == other.shape_id
    }
}

/// Spatial index for shapes using an R-tree.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ShapeId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape_id: ShapeId, bounds: Box2) {
        if let Some(old_entry) = self.entries.remove(&shape_id) {
            self.tree.remove(&old_entry);
        }
        let entry = SpatialEntry::new(shape_id, bounds);
        self.tree.insert(entry);
        self.entries.insert(shape_id, entry);
    }

    pub fn remove(&mut self, shape_id: ShapeId) -> bool {
        if let Some(entry) = self.entries.remove(&shape_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    pub fn update(&mut self, shape_id: ShapeId, bounds: Box2) {
        self.insert(shape_id, bounds);
    }

    /// All shapes whose bounds contain the given point.
    pub fn query_point(&self, x: f32, y: f32) -> Vec<ShapeId> {
        let point_envelope = AABB::from_point([x, y]);
        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.bounds.contains(crate::geom::Vec2::new(x, y)))
            .map(|entry| entry.shape_id)
            .collect()
    }

    /// All shapes whose bounds intersect a box.
    pub fn query_box(&self, query: &Box2) -> Vec<ShapeId> {
        let envelope = AABB::from_corners(
            [query.min.x, query.min.y],
            [query.max.x, query.max.y],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.shape_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything and bulk-load fresh entries.
    pub fn rebuild<I>(&mut self, items: I)
    where
        I: Iterator<Item = (ShapeId, Box2)>,
    {
        let entries: Vec<SpatialEntry> = items
            .map(|(id, bounds)| SpatialEntry::new(id, bounds))
            .collect();
        self.entries = entries.iter().map(|e| (e.shape_id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}
