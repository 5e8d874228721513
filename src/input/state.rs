//! Transient input state.
//!
//! One explicit record instead of scattered flags: where the current gesture
//! started, where the pointer is now, which pointer id is captured, whether
//! the drag threshold has been crossed, and the last-click record that
//! drives double-click detection.

use crate::geom::Vec2;
use crate::types::{Modifiers, PointerId, Target};

/// An accepted pointer-down: the target captures the pointer id until
/// release, regardless of what is visually under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capture {
    pub pointer_id: PointerId,
    pub target: Target,
}

/// Previous click, kept until consumed by a double-click or overwritten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickRecord {
    pub at_ms: u64,
    pub screen: Vec2,
    pub target: Target,
}

/// Transient input state threaded through the dispatcher; owned by the
/// editor instance, never a module-level global.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    /// Pointer-down position of the current gesture, page space.
    pub origin_page: Vec2,
    /// Pointer-down position of the current gesture, screen space.
    pub origin_screen: Vec2,
    /// Latest pointer position, page space.
    pub current_page: Vec2,
    /// Latest pointer position, screen space.
    pub current_screen: Vec2,
    /// Modifier keys as of the latest event.
    pub modifiers: Modifiers,
    /// True once movement exceeded the drag threshold after pointer-down.
    pub is_dragging: bool,
    capture: Option<Capture>,
    last_click: Option<ClickRecord>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.capture.is_some()
    }

    pub fn capture(&self) -> Option<Capture> {
        self.capture
    }

    pub(crate) fn set_capture(&mut self, pointer_id: PointerId, target: Target) {
        self.capture = Some(Capture { pointer_id, target });
    }

    pub(crate) fn release_capture(&mut self) {
        self.capture = None;
        self.is_dragging = false;
    }

    pub(crate) fn last_click(&self) -> Option<ClickRecord> {
        self.last_click
    }

    pub(crate) fn set_last_click(&mut self, record: Option<ClickRecord>) {
        self.last_click = record;
    }

    /// Reset everything gesture-related, keeping pointer positions.
    pub fn reset(&mut self) {
        self.capture = None;
        self.is_dragging = false;
        self.last_click = None;
    }
}
