//! The select tool: pointing, brushing, translating and resizing.
//!
//! Gesture shape shared by all leaves: a `pointing_*` state waits to learn
//! whether the pointer-down becomes a drag (crossing the threshold hands
//! off to `brushing`/`translating`/`resizing`) or a click (a discrete
//! select/deselect on pointer-up). Every leaf answers cancel and interrupt
//! by returning to `idle`, so the tree can never wedge mid-gesture.

use crate::constants::MIN_SHAPE_SIZE;
use crate::editor::ToolEnterOptions;
use crate::error::ToolError;
use crate::geom::{Box2, Vec2};
use crate::machine::{Handlers, StateNode, Tx};
use crate::types::{EventInfo, ShapePatch, Target};

/// Build the select tool's state tree.
pub fn build() -> Result<StateNode, ToolError> {
    StateNode::branch(
        super::SELECT,
        Handlers::default(),
        "idle",
        vec![
            idle(),
            pointing_canvas(),
            pointing_shape(),
            pointing_selection(),
            brushing(),
            translating(),
            resizing(),
        ],
    )
}

fn idle() -> StateNode {
    StateNode::leaf(
        "idle",
        Handlers {
            on_enter: Some(|tx, _| tx.editor.gesture.clear()),
            on_pointer_down: Some(|tx, info| match info.target {
                Target::Canvas => tx.transition("pointing_canvas"),
                Target::Shape(id) => {
                    tx.editor.gesture.pointing = Some(id);
                    tx.transition("pointing_shape");
                }
                Target::Selection => tx.transition("pointing_selection"),
            }),
            on_double_click: Some(on_double_click_drill),
            on_cancel: Some(|tx, _| {
                // first escape clears the selection, the next pops focus
                if !tx.editor.selection().is_empty() {
                    tx.editor.select_none();
                } else {
                    tx.editor.set_focus_layer(None);
                }
            }),
            ..Default::default()
        },
    )
}

/// Double-click on a group drills into it: the group becomes the focus
/// layer and the child under the pointer becomes the selection. Double-click
/// on the canvas pops back out.
fn on_double_click_drill(tx: &mut Tx<'_>, info: &EventInfo) {
    match info.target {
        Target::Shape(id) => {
            let is_group = tx
                .editor
                .store()
                .get(id)
                .is_some_and(|s| s.kind.is_group());
            if is_group {
                tx.editor.set_focus_layer(Some(id));
                if let Some(inner) = tx.editor.shape_at_point(info.page) {
                    tx.editor.select(vec![inner]);
                }
            }
        }
        Target::Canvas => {
            tx.editor.set_focus_layer(None);
        }
        Target::Selection => {}
    }
}

fn pointing_canvas() -> StateNode {
    StateNode::leaf(
        "pointing_canvas",
        Handlers {
            on_enter: Some(|tx, info| {
                if !info.modifiers.shift && !tx.editor.selection().is_empty() {
                    tx.editor.gesture.mark = Some(tx.editor.mark("selecting none"));
                    tx.editor.select_none();
                }
            }),
            on_pointer_move: Some(|tx, _| {
                if tx.editor.inputs.is_dragging {
                    tx.transition("brushing");
                }
            }),
            on_pointer_up: Some(|tx, _| tx.transition("idle")),
            on_complete: Some(|tx, _| tx.transition("idle")),
            on_cancel: Some(|tx, _| tx.transition("idle")),
            on_interrupt: Some(|tx, _| tx.transition("idle")),
            ..Default::default()
        },
    )
}

fn pointing_shape() -> StateNode {
    StateNode::leaf(
        "pointing_shape",
        Handlers {
            on_enter: Some(|tx, info| {
                let Some(id) = tx.editor.gesture.pointing.or(info.target.shape_id()) else {
                    return;
                };
                tx.editor.gesture.pointing = Some(id);
                if !info.modifiers.shift && !tx.editor.selection().is_selected(id) {
                    tx.editor.gesture.mark = Some(tx.editor.mark("selecting shape"));
                    tx.editor.select(vec![id]);
                }
            }),
            on_pointer_move: Some(|tx, _| {
                if tx.editor.inputs.is_dragging {
                    tx.transition("translating");
                }
            }),
            on_pointer_up: Some(|tx, info| {
                if let Some(id) = tx.editor.gesture.pointing {
                    if info.modifiers.shift {
                        tx.editor.toggle_selected(id);
                    } else {
                        tx.editor.select(vec![id]);
                    }
                }
                tx.transition("idle");
            }),
            on_double_click: Some(on_double_click_drill),
            on_cancel: Some(|tx, _| tx.transition("idle")),
            on_interrupt: Some(|tx, _| tx.transition("idle")),
            ..Default::default()
        },
    )
}

fn pointing_selection() -> StateNode {
    StateNode::leaf(
        "pointing_selection",
        Handlers {
            on_pointer_move: Some(|tx, _| {
                if tx.editor.inputs.is_dragging {
                    tx.transition("translating");
                }
            }),
            on_pointer_up: Some(|tx, _| {
                tx.editor.select_none();
                tx.transition("idle");
            }),
            on_double_click: Some(|tx, info| {
                // a double-click here was really aimed at whatever is under
                // the pointer inside the selection
                if let Some(hit) = tx.editor.hovered_shape() {
                    let mut forwarded = info.clone();
                    forwarded.target = Target::Shape(hit);
                    on_double_click_drill(tx, &forwarded);
                }
                tx.transition("idle");
            }),
            on_complete: Some(|tx, _| tx.transition("idle")),
            on_cancel: Some(|tx, _| tx.transition("idle")),
            on_interrupt: Some(|tx, _| tx.transition("idle")),
            ..Default::default()
        },
    )
}

fn brushing() -> StateNode {
    StateNode::leaf(
        "brushing",
        Handlers {
            on_enter: Some(|tx, _| {
                tx.editor.gesture.initial_selection = tx.editor.selected_ids();
            }),
            on_pointer_move: Some(|tx, info| {
                let brush = Box2::from_points(tx.editor.inputs.origin_page, info.page);
                let mut ids = tx.editor.shapes_in_box(&brush);
                if info.modifiers.shift {
                    ids.extend(tx.editor.gesture.initial_selection.iter().copied());
                }
                tx.editor.select(ids);
            }),
            on_pointer_up: Some(|tx, _| tx.transition("idle")),
            on_complete: Some(|tx, _| tx.transition("idle")),
            on_cancel: Some(|tx, _| {
                let initial = tx.editor.gesture.initial_selection.clone();
                tx.editor.select(initial);
                tx.transition("idle");
            }),
            on_interrupt: Some(|tx, _| tx.transition("idle")),
            ..Default::default()
        },
    )
}

fn translating() -> StateNode {
    StateNode::leaf(
        "translating",
        Handlers {
            on_enter: Some(|tx, _| {
                tx.editor.gesture.mark = Some(tx.editor.mark("translating"));
                tx.editor.gesture.initial_positions = tx
                    .editor
                    .selected_ids()
                    .into_iter()
                    .filter_map(|id| tx.editor.store().get(id).map(|s| (id, s.x, s.y)))
                    .collect();
            }),
            on_pointer_move: Some(|tx, info| {
                let delta = info.page - tx.editor.inputs.origin_page;
                let patches: Vec<ShapePatch> = tx
                    .editor
                    .gesture
                    .initial_positions
                    .iter()
                    .map(|&(id, x, y)| ShapePatch::position(id, x + delta.x, y + delta.y))
                    .collect();
                tx.editor.update_shapes(patches);
            }),
            on_pointer_up: Some(|tx, _| tx.transition("idle")),
            on_complete: Some(|tx, _| tx.transition("idle")),
            on_cancel: Some(|tx, _| {
                if let Some(mark) = tx.editor.gesture.mark {
                    tx.editor.undo_to(mark);
                }
                tx.transition("idle");
            }),
            on_interrupt: Some(|tx, _| tx.transition("idle")),
            ..Default::default()
        },
    )
}

fn resizing() -> StateNode {
    StateNode::leaf(
        "resizing",
        Handlers {
            on_enter: Some(|tx, _| {
                // a creation tool already opened the gesture's mark
                if tx.editor.gesture.mark.is_none() {
                    tx.editor.gesture.mark = Some(tx.editor.mark("resizing"));
                }
                let bounds: Vec<_> = tx
                    .editor
                    .selected_ids()
                    .into_iter()
                    .filter_map(|id| tx.editor.shape_bounds(id).map(|b| (id, b)))
                    .collect();
                tx.editor.gesture.origin_box = bounds
                    .iter()
                    .map(|(_, b)| *b)
                    .reduce(|acc, b| acc.union(&b));
                tx.editor.gesture.initial_bounds = bounds;
            }),
            on_pointer_move: Some(resize_to_pointer),
            on_pointer_up: Some(finish_resize),
            on_complete: Some(finish_resize),
            on_cancel: Some(|tx, _| {
                if let Some(mark) = tx.editor.gesture.mark {
                    tx.editor.undo_to(mark);
                }
                tx.transition("idle");
            }),
            on_interrupt: Some(|tx, _| tx.transition("idle")),
            ..Default::default()
        },
    )
}

/// Scale the gesture's initial bounds from the anchor opposite the grabbed
/// handle out to the current pointer position, as one update batch.
fn resize_to_pointer(tx: &mut Tx<'_>, info: &EventInfo) {
    let Some(origin_box) = tx.editor.gesture.origin_box else {
        return;
    };
    let anchor = tx.editor.gesture.handle.anchor(&origin_box);
    let next_box = Box2::from_points(anchor, info.page);
    let sx = scale(next_box.width(), origin_box.width());
    let sy = scale(next_box.height(), origin_box.height());

    let initial = tx.editor.gesture.initial_bounds.clone();
    let patches: Vec<ShapePatch> = initial
        .into_iter()
        .map(|(id, b)| {
            let min = Vec2::new(
                anchor.x + (b.min.x - anchor.x) * sx,
                anchor.y + (b.min.y - anchor.y) * sy,
            );
            let w = (b.width() * sx).max(MIN_SHAPE_SIZE);
            let h = (b.height() * sy).max(MIN_SHAPE_SIZE);
            ShapePatch::position(id, min.x, min.y)
                .with_prop("w", serde_json::json!(w))
                .with_prop("h", serde_json::json!(h))
        })
        .collect();
    tx.editor.update_shapes(patches);
}

fn scale(next: f32, origin: f32) -> f32 {
    if origin <= f32::EPSILON {
        1.0
    } else {
        (next / origin).max(f32::EPSILON)
    }
}

fn finish_resize(tx: &mut Tx<'_>, _info: &EventInfo) {
    // a locked creation tool gets the pointer back for the next shape
    if let Some(next_tool) = tx.editor.gesture.on_interaction_end {
        if tx.editor.is_tool_locked() {
            tx.editor.set_current_tool(next_tool, ToolEnterOptions::default());
            return;
        }
    }
    tx.transition("idle");
}
