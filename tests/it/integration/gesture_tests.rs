//! Translating, group drill-in, and cancellation from every gesture state.

use crate::helpers::TestCanvas;
use sketchboard::Modifiers;

#[test]
fn test_drag_translates_selected_shape() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);
    tc.click(25.0, 25.0);
    tc.rest();

    tc.drag((25.0, 25.0), (125.0, 75.0));
    let shape = tc.editor().store().get(s1).unwrap();
    assert_eq!((shape.x, shape.y), (100.0, 50.0));
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}

#[test]
fn test_drag_of_unselected_shape_selects_then_translates() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);

    tc.drag((25.0, 25.0), (75.0, 25.0));
    assert_eq!(tc.editor().selected_ids(), vec![s1]);
    assert_eq!(tc.editor().store().get(s1).unwrap().x, 50.0);
}

#[test]
fn test_translate_opens_exactly_one_mark() {
    let mut tc = TestCanvas::new();
    tc.shape(0.0, 0.0, 50.0, 50.0);
    tc.click(25.0, 25.0);
    tc.rest();
    let before = tc.editor().history_mark_count();

    tc.drag((25.0, 25.0), (200.0, 200.0));
    assert_eq!(tc.editor().history_mark_count(), before + 1);
}

#[test]
fn test_translate_cancel_restores_positions() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);
    tc.click(25.0, 25.0);
    tc.rest();

    tc.press(25.0, 25.0);
    tc.move_to(125.0, 125.0);
    tc.move_to(125.0, 125.0);
    assert_eq!(tc.editor().store().get(s1).unwrap().x, 100.0);

    tc.escape();
    let shape = tc.editor().store().get(s1).unwrap();
    assert_eq!((shape.x, shape.y), (0.0, 0.0));
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}

#[test]
fn test_drag_from_multiselect_interior_moves_all() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);
    let s2 = tc.shape(200.0, 200.0, 50.0, 50.0);
    tc.editor_mut().select(vec![s1, s2]);

    // over neither shape, inside the union bounds
    tc.drag((125.0, 125.0), (135.0, 145.0));
    assert_eq!(tc.editor().store().get(s1).unwrap().x, 10.0);
    assert_eq!(tc.editor().store().get(s2).unwrap().y, 220.0);
}

#[test]
fn test_double_click_drills_into_group() {
    let mut tc = TestCanvas::new();
    let group = tc.group();
    let c1 = tc.child(group, 0.0, 0.0, 50.0, 50.0);
    tc.child(group, 100.0, 0.0, 50.0, 50.0);

    // single click resolves to the group
    tc.click(25.0, 25.0);
    assert_eq!(tc.editor().selected_ids(), vec![group]);

    tc.rest();
    tc.double_click(25.0, 25.0);
    assert_eq!(tc.editor().selection().focus_layer(), Some(group));
    assert_eq!(tc.editor().selected_ids(), vec![c1]);
}

#[test]
fn test_focus_layer_makes_children_directly_selectable() {
    let mut tc = TestCanvas::new();
    let group = tc.group();
    tc.child(group, 0.0, 0.0, 50.0, 50.0);
    let c2 = tc.child(group, 100.0, 0.0, 50.0, 50.0);
    tc.editor_mut().set_focus_layer(Some(group));

    tc.click(125.0, 25.0);
    assert_eq!(tc.editor().selected_ids(), vec![c2]);
}

#[test]
fn test_double_click_on_canvas_pops_focus() {
    let mut tc = TestCanvas::new();
    let group = tc.group();
    tc.child(group, 0.0, 0.0, 50.0, 50.0);
    tc.editor_mut().set_focus_layer(Some(group));

    tc.double_click(500.0, 500.0);
    assert_eq!(tc.editor().selection().focus_layer(), None);
}

#[test]
fn test_escape_clears_selection_then_focus() {
    let mut tc = TestCanvas::new();
    let group = tc.group();
    let c1 = tc.child(group, 0.0, 0.0, 50.0, 50.0);
    tc.editor_mut().set_focus_layer(Some(group));
    tc.editor_mut().select(vec![c1]);

    tc.escape();
    assert!(tc.editor().selected_ids().is_empty());
    assert_eq!(tc.editor().selection().focus_layer(), Some(group));

    tc.escape();
    assert_eq!(tc.editor().selection().focus_layer(), None);
}

#[test]
fn test_cancel_is_safe_in_every_pointing_state() {
    // pointing_canvas
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);
    tc.press(500.0, 500.0);
    tc.escape();
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
    tc.release(500.0, 500.0);

    // pointing_shape
    tc.rest();
    tc.press(25.0, 25.0);
    tc.escape();
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
    tc.release(25.0, 25.0);

    // pointing_selection
    tc.rest();
    let s2 = tc.shape(200.0, 200.0, 50.0, 50.0);
    tc.editor_mut().select(vec![s1, s2]);
    tc.press(125.0, 125.0);
    tc.escape();
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
    tc.release(125.0, 125.0);
}

#[test]
fn test_interrupt_abandons_gesture_without_mutation() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);
    tc.click(25.0, 25.0);
    tc.rest();

    tc.press(25.0, 25.0);
    tc.move_to(125.0, 125.0);
    tc.move_to(125.0, 125.0);
    tc.d.interrupt();
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
    // interrupt leaves the document as-is; only cancel rolls back
    assert_eq!(tc.editor().store().get(s1).unwrap().x, 100.0);
}

#[test]
fn test_shift_click_on_canvas_keeps_selection() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);
    tc.click(25.0, 25.0);
    tc.rest();

    tc.press_with(500.0, 500.0, Modifiers::shift());
    assert_eq!(tc.editor().selected_ids(), vec![s1]);
    tc.release_with(500.0, 500.0, Modifiers::shift());
}
