//! Raw pointer events to canonical `EventInfo` records.
//!
//! Classification rules:
//! - A drag begins once the pointer moves more than the configured
//!   screen-space threshold from its down position while the same pointer
//!   id stays captured; below that, down-then-up is a click.
//! - Two pointer-ups on the same logical target within the configured time
//!   and distance window are a double-click. The click record is consumed
//!   on detection. Alt/meta chords suppress it.
//! - Move and up events for a pointer id that was never captured are
//!   ignored, as is a second pointer-down while one is captured; gestures
//!   beyond the primary pointer are out of scope.

use crate::config::InputConfig;
use crate::geom::Vec2;
use crate::input::coords::Camera;
use crate::input::state::{ClickRecord, InputTracker};
use crate::types::{EventInfo, EventKind, Modifiers, PointerId, Target};
use tracing::trace;

/// A pointer event as delivered by the platform boundary.
#[derive(Debug, Clone, Copy)]
pub struct RawPointerEvent {
    /// Position in screen space.
    pub screen: Vec2,
    pub modifiers: Modifiers,
    pub pointer_id: PointerId,
    /// Platform timestamp in milliseconds; only deltas matter.
    pub timestamp_ms: u64,
}

impl RawPointerEvent {
    pub fn new(screen: Vec2, pointer_id: PointerId, timestamp_ms: u64) -> Self {
        Self {
            screen,
            modifiers: Modifiers::NONE,
            pointer_id,
            timestamp_ms,
        }
    }
}

/// Converts raw events into `EventInfo`, updating the tracker as it goes.
#[derive(Debug, Default)]
pub struct InputNormalizer {
    pub camera: Camera,
}

impl InputNormalizer {
    pub fn new(camera: Camera) -> Self {
        Self { camera }
    }

    /// Normalize a pointer-down aimed at `target`. The target captures the
    /// pointer id. A down while another pointer is captured is ignored.
    pub fn pointer_down(
        &self,
        tracker: &mut InputTracker,
        raw: RawPointerEvent,
        target: Target,
    ) -> Option<EventInfo> {
        if tracker.is_pointer_down() {
            trace!(?raw.pointer_id, "ignoring secondary pointer down");
            return None;
        }
        let page = self.camera.screen_to_page(raw.screen);
        tracker.origin_screen = raw.screen;
        tracker.origin_page = page;
        tracker.current_screen = raw.screen;
        tracker.current_page = page;
        tracker.modifiers = raw.modifiers;
        tracker.is_dragging = false;
        tracker.set_capture(raw.pointer_id, target);
        Some(EventInfo {
            kind: EventKind::PointerDown,
            target,
            page,
            screen: raw.screen,
            modifiers: raw.modifiers,
            pointer_id: raw.pointer_id,
        })
    }

    /// Normalize a pointer-move. While a pointer is captured, moves for that
    /// id keep the captured target and feed drag detection; moves for other
    /// ids are dropped. With no capture, `hover_target` is used as-is.
    pub fn pointer_move(
        &self,
        tracker: &mut InputTracker,
        config: &InputConfig,
        raw: RawPointerEvent,
        hover_target: Target,
    ) -> Option<EventInfo> {
        let target = match tracker.capture() {
            Some(capture) if capture.pointer_id == raw.pointer_id => capture.target,
            Some(_) => return None,
            None => hover_target,
        };
        let page = self.camera.screen_to_page(raw.screen);
        tracker.current_screen = raw.screen;
        tracker.current_page = page;
        tracker.modifiers = raw.modifiers;
        if tracker.is_pointer_down()
            && !tracker.is_dragging
            && raw.screen.distance(tracker.origin_screen) > config.drag_threshold_px
        {
            trace!("drag threshold crossed");
            tracker.is_dragging = true;
        }
        Some(EventInfo {
            kind: EventKind::PointerMove,
            target,
            page,
            screen: raw.screen,
            modifiers: raw.modifiers,
            pointer_id: raw.pointer_id,
        })
    }

    /// Normalize a pointer-up. Releases the capture. Returns the up event
    /// plus a synthesized double-click when the click window matched. An up
    /// for a pointer that was never captured is ignored, not an error.
    pub fn pointer_up(
        &self,
        tracker: &mut InputTracker,
        config: &InputConfig,
        raw: RawPointerEvent,
    ) -> Option<(EventInfo, Option<EventInfo>)> {
        let capture = match tracker.capture() {
            Some(capture) if capture.pointer_id == raw.pointer_id => capture,
            _ => {
                trace!(?raw.pointer_id, "ignoring release without matching capture");
                return None;
            }
        };
        let page = self.camera.screen_to_page(raw.screen);
        tracker.current_screen = raw.screen;
        tracker.current_page = page;
        tracker.modifiers = raw.modifiers;
        let was_dragging = tracker.is_dragging;
        tracker.release_capture();

        let make = |kind: EventKind| EventInfo {
            kind,
            target: capture.target,
            page,
            screen: raw.screen,
            modifiers: raw.modifiers,
            pointer_id: raw.pointer_id,
        };

        // a drag is never half of a double-click
        let double = if was_dragging {
            tracker.set_last_click(None);
            None
        } else {
            self.detect_double_click(tracker, config, &raw, capture.target)
                .then(|| make(EventKind::DoubleClick))
        };

        Some((make(EventKind::PointerUp), double))
    }

    fn detect_double_click(
        &self,
        tracker: &mut InputTracker,
        config: &InputConfig,
        raw: &RawPointerEvent,
        target: Target,
    ) -> bool {
        let matched = tracker.last_click().is_some_and(|click| {
            click.target == target
                && raw.timestamp_ms.saturating_sub(click.at_ms) <= config.double_click_ms
                && raw.screen.distance(click.screen) <= config.double_click_tolerate_px
        });
        if matched {
            // consumed: a triple click does not chain
            tracker.set_last_click(None);
            // alt/meta chords mean something else on some platforms
            !(raw.modifiers.alt || raw.modifiers.meta)
        } else {
            tracker.set_last_click(Some(ClickRecord {
                at_ms: raw.timestamp_ms,
                screen: raw.screen,
                target,
            }));
            false
        }
    }
}
