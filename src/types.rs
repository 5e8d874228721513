//! Core data model: shapes, identities, z-order keys, and the canonical
//! event-info record that flows from the input normalizer to the tool state
//! trees.

use crate::geom::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identity
// ============================================================================

/// Opaque shape identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape:{}", self.0)
    }
}

/// Who a shape belongs to. The page root is the implicit top of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParentId {
    #[default]
    Page,
    Shape(ShapeId),
}

/// Extensible shape kind tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeKind(pub String);

impl ShapeKind {
    pub const GEO: &'static str = "geo";
    pub const GROUP: &'static str = "group";

    pub fn geo() -> Self {
        Self(Self::GEO.to_string())
    }

    pub fn group() -> Self {
        Self(Self::GROUP.to_string())
    }

    pub fn is_group(&self) -> bool {
        self.0 == Self::GROUP
    }
}

impl From<&str> for ShapeKind {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// Z-order
// ============================================================================

/// Ordered z-key, totally ordered and unique among siblings.
///
/// Appending uses whole steps; inserting between two siblings lands in the
/// middle of their gap, so indices grow denser in the middle of the list.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ZIndex(pub f64);

impl ZIndex {
    /// Key that sorts after `last` (or the first key on an empty list).
    pub fn after(last: Option<ZIndex>) -> Self {
        match last {
            Some(z) => ZIndex(z.0 + 1.0),
            None => ZIndex(1.0),
        }
    }

    /// Key in the middle of the gap between two existing siblings.
    pub fn between(a: ZIndex, b: ZIndex) -> Self {
        ZIndex((a.0 + b.0) / 2.0)
    }
}

// ============================================================================
// Shape
// ============================================================================

/// A shape record. Type-specific properties (width, height, geo style, ...)
/// live in `props`; their schema depends on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub props: HashMap<String, serde_json::Value>,
    pub parent: ParentId,
    pub z: ZIndex,
}

impl Shape {
    /// Read a numeric prop, defaulting to 0.0 when absent or non-numeric.
    pub fn prop_f32(&self, key: &str) -> f32 {
        self.props
            .get(key)
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    }

    pub fn width(&self) -> f32 {
        self.prop_f32("w")
    }

    pub fn height(&self) -> f32 {
        self.prop_f32("h")
    }
}

/// Definition for a shape about to be created. A missing id is generated;
/// a missing z appends at the end of the parent's list.
#[derive(Debug, Clone, Default)]
pub struct ShapeDef {
    pub id: Option<ShapeId>,
    pub kind: Option<ShapeKind>,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub props: HashMap<String, serde_json::Value>,
    pub parent: ParentId,
}

impl ShapeDef {
    pub fn geo(x: f32, y: f32, w: f32, h: f32) -> Self {
        let mut props = HashMap::new();
        props.insert("w".to_string(), serde_json::json!(w));
        props.insert("h".to_string(), serde_json::json!(h));
        Self {
            kind: Some(ShapeKind::geo()),
            x,
            y,
            props,
            ..Default::default()
        }
    }
}

/// Partial update for an existing shape. Unset fields keep their value;
/// `props` entries are merged over the existing map.
#[derive(Debug, Clone, Default)]
pub struct ShapePatch {
    pub id: ShapeId,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub rotation: Option<f32>,
    pub props: HashMap<String, serde_json::Value>,
}

impl ShapePatch {
    pub fn position(id: ShapeId, x: f32, y: f32) -> Self {
        Self {
            id,
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn with_prop(mut self, key: &str, value: serde_json::Value) -> Self {
        self.props.insert(key.to_string(), value);
        self
    }
}

// ============================================================================
// Events
// ============================================================================

/// Platform pointer identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerId(pub u32);

/// Modifier-key flags captured with each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Modifiers {
            shift: true,
            ..Self::NONE
        }
    }
}

/// What an event is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Canvas,
    /// Empty interior of the multi-select bounds.
    Selection,
    Shape(ShapeId),
}

impl Target {
    pub fn shape_id(&self) -> Option<ShapeId> {
        match self {
            Target::Shape(id) => Some(*id),
            _ => None,
        }
    }
}

/// Corner handle for resize gestures. Creation flows resize from the
/// bottom-right, anchored at the origin point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl ResizeHandle {
    /// The fixed corner of a box while this handle is dragged.
    pub fn anchor(&self, b: &crate::geom::Box2) -> Vec2 {
        match self {
            ResizeHandle::TopLeft => b.max,
            ResizeHandle::TopRight => Vec2::new(b.min.x, b.max.y),
            ResizeHandle::BottomLeft => Vec2::new(b.max.x, b.min.y),
            ResizeHandle::BottomRight => b.min,
        }
    }
}

/// Kind of a dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    DoubleClick,
    KeyDown(String),
    Cancel,
    Complete,
    Interrupt,
}

/// Canonical event record consumed by the state trees.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInfo {
    pub kind: EventKind,
    pub target: Target,
    /// Position in page space (canvas coordinates).
    pub page: Vec2,
    /// Position in screen space (device-independent pixels).
    pub screen: Vec2,
    pub modifiers: Modifiers,
    pub pointer_id: PointerId,
}

impl EventInfo {
    /// Synthetic event for transitions not driven by a pointer (tool
    /// switches, external cancel/complete/interrupt).
    pub fn synthetic(kind: EventKind) -> Self {
        Self {
            kind,
            target: Target::Canvas,
            page: Vec2::ZERO,
            screen: Vec2::ZERO,
            modifiers: Modifiers::NONE,
            pointer_id: PointerId::default(),
        }
    }
}
