//! Hit testing: resolving which shape a page point refers to.
//!
//! Resolution has two decoupled halves. First, find the topmost shape whose
//! geometry contains the point, using the spatial index for candidates and
//! the rendering order for z. Second, walk up to the outermost selectable
//! ancestor: clicking inside a group selects the group, not a buried child,
//! unless that group is already the focus layer. Keeping those halves apart
//! lets grouped shapes behave intuitively without the containment scan
//! knowing anything about selection policy.

use crate::geom::{Box2, Vec2};
use crate::selection::SelectionManager;
use crate::spatial_index::SpatialIndex;
use crate::store::ShapeStore;
use crate::types::{Shape, ShapeId};

/// Geometry capability supplied by the shape implementations.
///
/// The editor's shape-geometry utilities are consumed through this trait,
/// not reimplemented here.
pub trait ShapeGeometry {
    /// Whether the page point falls inside the shape's geometry.
    fn contains_point(&self, shape: &Shape, point: Vec2) -> bool;
    /// The shape's page-space bounding box.
    fn bounds(&self, shape: &Shape) -> Box2;
}

/// Default geometry: every shape is its axis-aligned w/h box. Groups have
/// no geometry of their own and are hit only through their children.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxGeometry;

impl ShapeGeometry for BoxGeometry {
    fn contains_point(&self, shape: &Shape, point: Vec2) -> bool {
        if shape.kind.is_group() {
            return false;
        }
        self.bounds(shape).contains(point)
    }

    fn bounds(&self, shape: &Shape) -> Box2 {
        Box2::from_xywh(shape.x, shape.y, shape.width(), shape.height())
    }
}

/// Hit tester over the current synchronous snapshot of the shape store.
#[derive(Debug, Default)]
pub struct HitTester {
    index: SpatialIndex,
}

impl HitTester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn track(&mut self, shape: &Shape, geometry: &dyn ShapeGeometry) {
        self.index.update(shape.id, geometry.bounds(shape));
    }

    pub fn untrack(&mut self, id: ShapeId) {
        self.index.remove(id);
    }

    pub fn rebuild(&mut self, store: &ShapeStore, geometry: &dyn ShapeGeometry) {
        self.index
            .rebuild(store.iter().map(|s| (s.id, geometry.bounds(s))));
    }

    /// Resolve a page point to the shape it refers to under z-order,
    /// grouping and focus-layer rules. None when nothing contains it.
    pub fn resolve_hit(
        &self,
        point: Vec2,
        store: &ShapeStore,
        selection: &SelectionManager,
        geometry: &dyn ShapeGeometry,
    ) -> Option<ShapeId> {
        let raw = self.raw_hit(point, store, selection, geometry)?;
        let outermost = outermost_selectable(raw, store, selection);
        // The raw hit is already at the right granularity when resolution
        // lands on the focus layer itself.
        if Some(outermost) == selection.focus_layer() {
            Some(raw)
        } else {
            Some(outermost)
        }
    }

    /// The topmost shape whose geometry contains the point, ignoring
    /// selection policy. This is also what "hovered" means.
    pub fn raw_hit(
        &self,
        point: Vec2,
        store: &ShapeStore,
        selection: &SelectionManager,
        geometry: &dyn ShapeGeometry,
    ) -> Option<ShapeId> {
        let candidates = self.index.query_point(point.x, point.y);
        if candidates.is_empty() {
            return None;
        }

        let focus = selection.focus_layer();
        let mut best: Option<(ShapeId, u32)> = None;
        for (id, order) in store.rendering_order() {
            if !candidates.contains(&id) {
                continue;
            }
            // focus-layer restriction: only descendants of the focus layer
            // are hittable while one is set
            if let Some(layer) = focus {
                if id != layer && !store.is_within(id, layer) {
                    continue;
                }
            }
            let Some(shape) = store.get(id) else { continue };
            if !geometry.contains_point(shape, point) {
                continue;
            }
            if best.is_none_or(|(_, i)| order > i) {
                best = Some((id, order));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Shapes whose bounds intersect a page-space box, used by brush
    /// selection. Respects the focus-layer restriction.
    pub fn hits_in_box(
        &self,
        query: &Box2,
        store: &ShapeStore,
        selection: &SelectionManager,
    ) -> Vec<ShapeId> {
        let focus = selection.focus_layer();
        self.index
            .query_box(query)
            .into_iter()
            // groups are reached through their children, never directly
            .filter(|id| store.get(*id).is_some_and(|s| !s.kind.is_group()))
            .filter(|id| match focus {
                Some(layer) => *id != layer && store.is_within(*id, layer),
                None => true,
            })
            .map(|id| outermost_selectable(id, store, selection))
            .collect()
    }
}

/// Walk from a hit shape up to its outermost ancestor below the current
/// focus layer. The focus layer itself is never the result: with a layer
/// set, its direct children are what clicks resolve to.
pub fn outermost_selectable(
    hit: ShapeId,
    store: &ShapeStore,
    selection: &SelectionManager,
) -> ShapeId {
    let focus = selection.focus_layer();
    let mut outermost = hit;
    for ancestor in store.ancestors(hit) {
        if Some(ancestor) == focus {
            break;
        }
        outermost = ancestor;
    }
    outermost
}
