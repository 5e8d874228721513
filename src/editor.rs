//! Editor command surface.
//!
//! The single mutation API for the shape store, selection and history. Tool
//! state handlers only ever mutate the document through these operations;
//! that is a convention rather than a lock, because exactly one synchronous
//! event handler runs at a time. Every operation is safe to call
//! redundantly, and operations on stale shape ids are no-ops: a gesture can
//! span many events during which concurrent commands legally delete shapes.

use crate::config::InputConfig;
use crate::geom::{Box2, Vec2};
use crate::history::{Document, History, Mark};
use crate::hit_testing::{BoxGeometry, HitTester, ShapeGeometry};
use crate::input::InputTracker;
use crate::selection::SelectionManager;
use crate::store::ShapeStore;
use crate::types::{
    ParentId, ResizeHandle, Shape, ShapeDef, ShapeId, ShapeKind, ShapePatch, Target,
};
use crate::error::EditorError;
use tracing::{debug, warn};

/// Discrete change notification for a presentation layer. The core never
/// depends on a rendering framework; it only emits these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    ShapesChanged,
    SelectionChanged,
    ToolChanged(&'static str),
}

/// Options carried by a tool switch. `target` jumps the new tool straight
/// into a nested state (dotted path below the tool root, e.g. "resizing")
/// instead of its default idle; the remaining fields parameterize that
/// state's entry, which is how a creation tool hands off to live-resize.
#[derive(Debug, Clone, Default)]
pub struct ToolEnterOptions {
    pub target: Option<&'static str>,
    pub handle: Option<ResizeHandle>,
    pub is_creating: bool,
    /// Tool to return to when the jumped-into interaction ends.
    pub on_interaction_end: Option<&'static str>,
    /// Undo mark the handing-off tool already opened for this gesture.
    pub mark: Option<Mark>,
}

/// A queued tool switch, applied by the dispatcher once the current
/// dispatch has run to completion.
#[derive(Debug, Clone)]
pub struct ToolChange {
    pub tool: &'static str,
    pub options: ToolEnterOptions,
}

/// Scratch state for the gesture in flight. State handlers are plain
/// function pointers, so per-gesture data lives here instead of on state
/// objects. Cleared whenever a gesture ends.
#[derive(Debug, Default)]
pub struct GestureState {
    /// The one undo mark this gesture opened, if any.
    pub mark: Option<Mark>,
    /// Shape the gesture started on (pointing_shape).
    pub pointing: Option<ShapeId>,
    /// Positions at gesture start (translating).
    pub initial_positions: Vec<(ShapeId, f32, f32)>,
    /// Selection at gesture start (brushing restores it on cancel).
    pub initial_selection: Vec<ShapeId>,
    /// Per-shape bounds at gesture start (resizing).
    pub initial_bounds: Vec<(ShapeId, Box2)>,
    /// Union of `initial_bounds` (resizing reference box).
    pub origin_box: Option<Box2>,
    pub handle: ResizeHandle,
    pub is_creating: bool,
    pub on_interaction_end: Option<&'static str>,
}

impl GestureState {
    pub fn clear(&mut self) {
        *self = GestureState::default();
    }
}

type Subscriber = Box<dyn FnMut(&EditorEvent)>;

/// The editor: shape store, selection, history, hit testing and input
/// state, mutated only through the command surface.
pub struct Editor {
    store: ShapeStore,
    selection: SelectionManager,
    history: History,
    hit_tester: HitTester,
    geometry: Box<dyn ShapeGeometry>,
    config: InputConfig,
    /// Transient input state; written by the normalizer, read by states.
    pub inputs: InputTracker,
    /// Scratch for the gesture in flight.
    pub gesture: GestureState,
    current_tool: &'static str,
    tool_locked: bool,
    pending_tool_change: Option<ToolChange>,
    subscribers: Vec<Subscriber>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_geometry(Box::new(BoxGeometry))
    }

    /// Build an editor over a caller-supplied geometry capability.
    pub fn with_geometry(geometry: Box<dyn ShapeGeometry>) -> Self {
        Self {
            store: ShapeStore::new(),
            selection: SelectionManager::new(),
            history: History::new(),
            hit_tester: HitTester::new(),
            geometry,
            config: InputConfig::default(),
            inputs: InputTracker::new(),
            gesture: GestureState::default(),
            current_tool: "select",
            tool_locked: false,
            pending_tool_change: None,
            subscribers: Vec::new(),
        }
    }

    pub fn set_config(&mut self, config: InputConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.selection.selected_ids().to_vec()
    }

    pub fn current_tool(&self) -> &'static str {
        self.current_tool
    }

    pub fn is_tool_locked(&self) -> bool {
        self.tool_locked
    }

    /// Keep the active tool when a creation gesture completes.
    pub fn set_tool_locked(&mut self, locked: bool) {
        self.tool_locked = locked;
    }

    pub fn history_mark_count(&self) -> usize {
        self.history.mark_count()
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&EditorEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn emit(&mut self, event: EditorEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    // ========================================================================
    // Command surface
    // ========================================================================

    /// Open an undo checkpoint named for debuggability.
    pub fn mark(&mut self, label: &str) -> Mark {
        let doc = Document {
            shapes: self.store.clone(),
            selection: self.selection.clone(),
        };
        self.history.mark(label, doc)
    }

    /// Create shapes, appending each at the end of its parent's z-order.
    /// Ids are generated when absent; an explicit collision or an unknown
    /// parent is reported and that definition skipped, never a crash.
    /// Returns the ids actually created.
    pub fn create_shapes(&mut self, defs: Vec<ShapeDef>) -> Vec<ShapeId> {
        let mut created = Vec::with_capacity(defs.len());
        for def in defs {
            let id = def.id.unwrap_or_else(ShapeId::new);
            if self.store.contains(id) {
                warn!(%id, "{}", EditorError::IdCollision(id));
                continue;
            }
            if let ParentId::Shape(parent) = def.parent {
                if !self.store.contains(parent) {
                    warn!(%id, "{}", EditorError::UnknownParent(parent));
                    continue;
                }
            }
            let shape = Shape {
                id,
                kind: def.kind.unwrap_or_else(ShapeKind::geo),
                x: def.x,
                y: def.y,
                rotation: def.rotation,
                props: def.props,
                parent: def.parent,
                z: self.store.next_z(def.parent),
            };
            self.hit_tester.track(&shape, self.geometry.as_ref());
            self.store.insert(shape);
            created.push(id);
        }
        if !created.is_empty() {
            debug!(count = created.len(), "created shapes");
            self.emit(EditorEvent::ShapesChanged);
        }
        created
    }

    /// Merge partial updates into existing shapes. Stale ids no-op.
    pub fn update_shapes(&mut self, patches: Vec<ShapePatch>) {
        let mut changed = false;
        for patch in patches {
            let Some(shape) = self.store.get_mut(patch.id) else {
                continue;
            };
            if let Some(x) = patch.x {
                shape.x = x;
            }
            if let Some(y) = patch.y {
                shape.y = y;
            }
            if let Some(rotation) = patch.rotation {
                shape.rotation = rotation;
            }
            for (key, value) in patch.props {
                shape.props.insert(key, value);
            }
            let updated = shape.clone();
            self.hit_tester.track(&updated, self.geometry.as_ref());
            changed = true;
        }
        if changed {
            self.emit(EditorEvent::ShapesChanged);
        }
    }

    /// Delete shapes and their descendants. Stale ids no-op.
    pub fn delete_shapes(&mut self, ids: &[ShapeId]) {
        let mut removed = false;
        for &id in ids {
            if !self.store.contains(id) {
                continue;
            }
            for sub in self.store.subtree(id) {
                self.store.remove(sub);
                self.hit_tester.untrack(sub);
                removed = true;
            }
        }
        if removed {
            self.emit(EditorEvent::ShapesChanged);
            if self.selection.prune(&self.store) {
                self.emit(EditorEvent::SelectionChanged);
            }
        }
    }

    /// Replace the selection. Idempotent: re-selecting the same set emits
    /// nothing. Ids not in the store are dropped.
    pub fn select(&mut self, ids: Vec<ShapeId>) {
        let live: Vec<ShapeId> = ids.into_iter().filter(|id| self.store.contains(*id)).collect();
        if self.selection.select_ids(live) {
            self.emit(EditorEvent::SelectionChanged);
        }
    }

    pub fn select_none(&mut self) {
        if self.selection.select_none() {
            self.emit(EditorEvent::SelectionChanged);
        }
    }

    /// Toggle one shape in the selection (shift-click).
    pub fn toggle_selected(&mut self, id: ShapeId) {
        if !self.store.contains(id) {
            return;
        }
        self.selection.toggle(id);
        self.emit(EditorEvent::SelectionChanged);
    }

    pub fn set_focus_layer(&mut self, layer: Option<ShapeId>) {
        self.selection.set_focus_layer(layer);
    }

    /// Queue a tool switch. Applied by the dispatcher after the current
    /// dispatch unwinds, so handlers always run to completion.
    pub fn set_current_tool(&mut self, tool: &'static str, options: ToolEnterOptions) {
        debug!(tool, "queueing tool change");
        self.pending_tool_change = Some(ToolChange { tool, options });
    }

    pub(crate) fn take_pending_tool_change(&mut self) -> Option<ToolChange> {
        self.pending_tool_change.take()
    }

    pub(crate) fn note_tool_changed(&mut self, tool: &'static str) {
        self.current_tool = tool;
        self.emit(EditorEvent::ToolChanged(tool));
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Roll back to the state captured at `mark`. Stale marks no-op.
    pub fn undo_to(&mut self, mark: Mark) {
        if let Some(doc) = self.history.undo_to(mark) {
            self.restore(doc);
        }
    }

    pub fn undo(&mut self) -> bool {
        let current = Document {
            shapes: self.store.clone(),
            selection: self.selection.clone(),
        };
        match self.history.undo(current) {
            Some(doc) => {
                self.restore(doc);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = Document {
            shapes: self.store.clone(),
            selection: self.selection.clone(),
        };
        match self.history.redo(current) {
            Some(doc) => {
                self.restore(doc);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, doc: Document) {
        self.store = doc.shapes;
        self.selection = doc.selection;
        self.selection.prune(&self.store);
        self.hit_tester.rebuild(&self.store, self.geometry.as_ref());
        self.emit(EditorEvent::ShapesChanged);
        self.emit(EditorEvent::SelectionChanged);
    }

    // ========================================================================
    // Queries used by the tool states and the dispatcher
    // ========================================================================

    /// Resolve a page point to the shape it refers to.
    pub fn shape_at_point(&self, point: Vec2) -> Option<ShapeId> {
        self.hit_tester
            .resolve_hit(point, &self.store, &self.selection, self.geometry.as_ref())
    }

    /// The shape under the pointer right now. Derived, never stored: it is
    /// recomputed from the live pointer position and shape tree.
    pub fn hovered_shape(&self) -> Option<ShapeId> {
        self.shape_at_point(self.inputs.current_page)
    }

    /// Shapes intersecting a page-space box (brush selection).
    pub fn shapes_in_box(&self, query: &Box2) -> Vec<ShapeId> {
        self.hit_tester
            .hits_in_box(query, &self.store, &self.selection)
    }

    /// Page-space bounds of a single shape.
    pub fn shape_bounds(&self, id: ShapeId) -> Option<Box2> {
        self.store.get(id).map(|s| self.geometry.bounds(s))
    }

    /// Union of the selected shapes' bounds, when any are selected.
    pub fn selection_bounds(&self) -> Option<Box2> {
        let mut bounds: Option<Box2> = None;
        for &id in self.selection.selected_ids() {
            if let Some(b) = self.shape_bounds(id) {
                bounds = Some(match bounds {
                    Some(acc) => acc.union(&b),
                    None => b,
                });
            }
        }
        bounds
    }

    /// Classify what a pointer-down at `point` is aimed at: a shape, the
    /// empty interior of the multi-select bounds, or the canvas.
    pub fn target_at_point(&self, point: Vec2) -> Target {
        if let Some(id) = self.shape_at_point(point) {
            return Target::Shape(id);
        }
        if self.selection.selected_ids().len() > 1 {
            if let Some(bounds) = self.selection_bounds() {
                if bounds.contains(point) {
                    return Target::Selection;
                }
            }
        }
        Target::Canvas
    }
}
