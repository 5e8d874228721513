//! The geo tool: create box shapes by click or by drag.
//!
//! A drag creates a 1x1 shape at the origin and immediately hands the
//! gesture to the select tool's resizing state, so the user sizes the new
//! shape live without lifting the pointer. A plain click creates a
//! default-size shape centered on the click point.

use crate::constants::{CREATED_SHAPE_SIZE, DEFAULT_GEO_SIZE};
use crate::editor::ToolEnterOptions;
use crate::error::ToolError;
use crate::machine::{Handlers, StateNode, Tx};
use crate::types::{EventInfo, ResizeHandle, ShapeDef};

/// Build the geo tool's state tree.
pub fn build() -> Result<StateNode, ToolError> {
    StateNode::branch(
        super::GEO,
        Handlers::default(),
        "idle",
        vec![idle(), pointing()],
    )
}

fn idle() -> StateNode {
    StateNode::leaf(
        "idle",
        Handlers {
            on_enter: Some(|tx, _| tx.editor.gesture.clear()),
            on_pointer_down: Some(|tx, _| tx.transition("pointing")),
            on_cancel: Some(|tx, _| {
                tx.editor
                    .set_current_tool(super::SELECT, ToolEnterOptions::default());
            }),
            ..Default::default()
        },
    )
}

fn pointing() -> StateNode {
    StateNode::leaf(
        "pointing",
        Handlers {
            on_pointer_move: Some(|tx, _| {
                if tx.editor.inputs.is_dragging {
                    create_and_resize(tx);
                }
            }),
            on_pointer_up: Some(create_at_click),
            on_complete: Some(create_at_click),
            on_cancel: Some(|tx, _| tx.transition("idle")),
            on_interrupt: Some(|tx, _| tx.transition("idle")),
            ..Default::default()
        },
    )
}

/// Drag path: create a minimal shape at the origin point and jump into the
/// select tool's resizing state to size it live. The undo mark opened here
/// travels with the handoff so cancel rolls the whole creation back.
fn create_and_resize(tx: &mut Tx<'_>) {
    let origin = tx.editor.inputs.origin_page;
    let mark = tx.editor.mark("creating");
    let (w, h) = CREATED_SHAPE_SIZE;
    let created = tx
        .editor
        .create_shapes(vec![ShapeDef::geo(origin.x, origin.y, w, h)]);
    let Some(&id) = created.first() else { return };
    tx.editor.select(vec![id]);
    tx.editor.set_current_tool(
        super::SELECT,
        ToolEnterOptions {
            target: Some("resizing"),
            handle: Some(ResizeHandle::BottomRight),
            is_creating: true,
            on_interaction_end: Some(super::GEO),
            mark: Some(mark),
        },
    );
}

/// Click path: create a default-size shape centered on the click point.
fn create_at_click(tx: &mut Tx<'_>, _info: &EventInfo) {
    let origin = tx.editor.inputs.origin_page;
    let (w, h) = DEFAULT_GEO_SIZE;
    tx.editor.gesture.mark = Some(tx.editor.mark("creating"));
    let created = tx
        .editor
        .create_shapes(vec![ShapeDef::geo(origin.x - w / 2.0, origin.y - h / 2.0, w, h)]);
    if let Some(&id) = created.first() {
        tx.editor.select(vec![id]);
    }
    if tx.editor.is_tool_locked() {
        tx.transition("idle");
    } else {
        tx.editor
            .set_current_tool(super::SELECT, ToolEnterOptions::default());
    }
}
