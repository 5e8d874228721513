//! Click selection, z-order resolution, brushing and event purity.

use crate::helpers::TestCanvas;
use sketchboard::{EditorEvent, Modifiers, Target, Vec2};

#[test]
fn test_click_selects_shape_under_pointer() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 100.0, 100.0);

    tc.click(50.0, 50.0);
    assert_eq!(tc.editor().selected_ids(), vec![s1]);
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}

#[test]
fn test_topmost_shape_wins_in_overlap() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 100.0, 100.0);
    let s2 = tc.shape(50.0, 50.0, 100.0, 100.0);

    // inside both; the later-created shape sits above
    tc.click(75.0, 75.0);
    assert_eq!(tc.editor().selected_ids(), vec![s2]);

    tc.rest();
    tc.click(25.0, 25.0);
    assert_eq!(tc.editor().selected_ids(), vec![s1]);
}

#[test]
fn test_click_on_empty_canvas_clears_selection() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 100.0, 100.0);
    tc.click(50.0, 50.0);
    assert_eq!(tc.editor().selected_ids(), vec![s1]);

    tc.rest();
    tc.click(500.0, 500.0);
    assert!(tc.editor().selected_ids().is_empty());
}

#[test]
fn test_shift_click_toggles_membership() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);
    let s2 = tc.shape(100.0, 0.0, 50.0, 50.0);

    tc.click(25.0, 25.0);
    tc.rest();
    tc.click_with(125.0, 25.0, Modifiers::shift());
    let mut selected = tc.editor().selected_ids();
    selected.sort();
    let mut expected = vec![s1, s2];
    expected.sort();
    assert_eq!(selected, expected);

    tc.rest();
    tc.click_with(125.0, 25.0, Modifiers::shift());
    assert_eq!(tc.editor().selected_ids(), vec![s1]);
}

#[test]
fn test_clicks_emit_no_document_changes() {
    let mut tc = TestCanvas::new();
    tc.shape(0.0, 0.0, 100.0, 100.0);
    let events = tc.record_events();

    // empty selection, empty canvas: a click is pure
    tc.click(500.0, 500.0);
    assert!(events.borrow().is_empty());

    tc.rest();
    tc.click(50.0, 50.0);
    assert_eq!(*events.borrow(), vec![EditorEvent::SelectionChanged]);
}

#[test]
fn test_reclick_of_selected_shape_emits_nothing() {
    let mut tc = TestCanvas::new();
    tc.shape(0.0, 0.0, 100.0, 100.0);
    tc.click(50.0, 50.0);
    tc.rest();

    let events = tc.record_events();
    tc.click(50.0, 50.0);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_click_inside_multiselect_bounds_clears_selection() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);
    let s2 = tc.shape(200.0, 200.0, 50.0, 50.0);
    tc.editor_mut().select(vec![s1, s2]);

    // over neither shape but inside the union bounds
    assert_eq!(
        tc.editor().target_at_point(Vec2::new(125.0, 125.0)),
        Target::Selection
    );
    tc.click(125.0, 125.0);
    assert!(tc.editor().selected_ids().is_empty());
}

#[test]
fn test_brush_selects_intersecting_shapes() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(50.0, 50.0, 50.0, 50.0);
    let s2 = tc.shape(150.0, 150.0, 50.0, 50.0);
    tc.shape(600.0, 600.0, 50.0, 50.0);

    tc.drag((0.0, 0.0), (250.0, 250.0));
    let mut selected = tc.editor().selected_ids();
    selected.sort();
    let mut expected = vec![s1, s2];
    expected.sort();
    assert_eq!(selected, expected);
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}

#[test]
fn test_shift_brush_extends_existing_selection() {
    let mut tc = TestCanvas::new();
    let s1 = tc.shape(0.0, 0.0, 50.0, 50.0);
    let s2 = tc.shape(250.0, 250.0, 50.0, 50.0);
    tc.click(25.0, 25.0);
    tc.rest();

    tc.press_with(200.0, 200.0, Modifiers::shift());
    tc.move_with(350.0, 350.0, Modifiers::shift());
    tc.move_with(350.0, 350.0, Modifiers::shift());
    tc.release_with(350.0, 350.0, Modifiers::shift());

    let mut selected = tc.editor().selected_ids();
    selected.sort();
    let mut expected = vec![s1, s2];
    expected.sort();
    assert_eq!(selected, expected);
}

#[test]
fn test_brush_cancel_restores_initial_selection() {
    let mut tc = TestCanvas::new();
    tc.shape(50.0, 50.0, 50.0, 50.0);

    tc.press(0.0, 0.0);
    tc.move_to(200.0, 200.0);
    tc.move_to(200.0, 200.0);
    assert!(!tc.editor().selected_ids().is_empty());

    tc.escape();
    assert!(tc.editor().selected_ids().is_empty());
    assert_eq!(tc.d.active_path(), vec!["select", "idle"]);
}
