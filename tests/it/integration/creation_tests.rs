//! The geo tool: click-to-create, drag-to-create with live resize, tool
//! locking, and rollback on cancel.

use crate::helpers::TestCanvas;
use sketchboard::{tools, ToolEnterOptions};

fn geo_canvas() -> TestCanvas {
    let mut tc = TestCanvas::new();
    tc.d.set_current_tool(tools::GEO, ToolEnterOptions::default());
    assert_eq!(tc.d.active_path(), vec!["geo", "idle"]);
    tc
}

#[test]
fn test_click_creates_default_size_shape_centered() {
    let mut tc = geo_canvas();
    tc.click(300.0, 300.0);

    let selected = tc.editor().selected_ids();
    assert_eq!(selected.len(), 1);
    let shape = tc.editor().store().get(selected[0]).unwrap();
    assert_eq!((shape.x, shape.y), (200.0, 200.0));
    assert_eq!((shape.width(), shape.height()), (200.0, 200.0));

    // an unlocked creation tool hands back to select
    assert_eq!(tc.editor().current_tool(), tools::SELECT);
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}

#[test]
fn test_drag_creates_shape_sized_to_the_drag() {
    let mut tc = geo_canvas();
    tc.press(10.0, 10.0);
    tc.move_to(120.0, 140.0);

    // the first threshold-crossing move creates the shape and hands the
    // gesture to live resize
    assert_eq!(tc.d.active_path(), vec!["select", "resizing"]);
    assert!(tc.editor().gesture.is_creating);

    tc.move_to(120.0, 140.0);
    tc.release(120.0, 140.0);

    let selected = tc.editor().selected_ids();
    assert_eq!(selected.len(), 1);
    let shape = tc.editor().store().get(selected[0]).unwrap();
    insta::assert_snapshot!(
        format!(
            "{} at ({},{}) {}x{}",
            shape.kind.0,
            shape.x,
            shape.y,
            shape.width(),
            shape.height()
        ),
        @"geo at (10,10) 110x130"
    );
    assert_eq!(tc.editor().current_tool(), tools::SELECT);
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}

#[test]
fn test_drag_creation_opens_exactly_one_mark() {
    let mut tc = geo_canvas();
    assert_eq!(tc.editor().history_mark_count(), 0);

    tc.drag((10.0, 10.0), (120.0, 140.0));
    assert_eq!(tc.editor().history_mark_count(), 1);
}

#[test]
fn test_cancel_mid_resize_rolls_back_creation() {
    let mut tc = geo_canvas();
    tc.press(10.0, 10.0);
    tc.move_to(120.0, 140.0);
    tc.move_to(120.0, 140.0);
    assert_eq!(tc.editor().store().len(), 1);

    tc.escape();
    assert!(tc.editor().store().is_empty());
    assert!(tc.editor().selected_ids().is_empty());
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);

    tc.release(120.0, 140.0);
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}

#[test]
fn test_locked_tool_returns_to_geo_after_drag() {
    let mut tc = geo_canvas();
    tc.editor_mut().set_tool_locked(true);

    tc.drag((10.0, 10.0), (120.0, 140.0));
    assert_eq!(tc.editor().store().len(), 1);
    assert_eq!(tc.editor().current_tool(), tools::GEO);
    assert_eq!(tc.d.active_path(), vec!["geo", "idle"]);
}

#[test]
fn test_locked_tool_stays_on_geo_after_click() {
    let mut tc = geo_canvas();
    tc.editor_mut().set_tool_locked(true);

    tc.click(100.0, 100.0);
    tc.rest();
    tc.click(500.0, 100.0);
    assert_eq!(tc.editor().store().len(), 2);
    assert_eq!(tc.editor().current_tool(), tools::GEO);
}

#[test]
fn test_escape_in_geo_idle_returns_to_select() {
    let mut tc = geo_canvas();
    tc.escape();
    assert_eq!(tc.editor().current_tool(), tools::SELECT);
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}

#[test]
fn test_unknown_tool_request_is_ignored() {
    let mut tc = TestCanvas::new();
    tc.d.set_current_tool("laser", ToolEnterOptions::default());
    assert_eq!(tc.editor().current_tool(), tools::SELECT);
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}
