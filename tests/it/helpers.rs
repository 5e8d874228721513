//! Shared fixtures: a canvas driven by scripted pointer and key events.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use sketchboard::{
    Dispatcher, Editor, EditorEvent, Modifiers, ParentId, PointerId, RawPointerEvent, ShapeDef,
    ShapeId, ShapeKind, ToolRegistry, Vec2,
};

static TRACING: Once = Once::new();

/// Honor RUST_LOG when debugging a failing test.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A dispatcher plus a monotonically advancing clock, so click and
/// double-click timing is explicit in each test.
pub struct TestCanvas {
    pub d: Dispatcher,
    now_ms: u64,
}

impl TestCanvas {
    pub fn new() -> Self {
        init_tracing();
        let d = Dispatcher::new(Editor::new(), ToolRegistry::with_defaults())
            .expect("built-in tools are structurally valid");
        Self { d, now_ms: 0 }
    }

    pub fn editor(&self) -> &Editor {
        self.d.editor()
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        self.d.editor_mut()
    }

    /// Collect every event the editor emits from here on.
    pub fn record_events(&mut self) -> Rc<RefCell<Vec<EditorEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        self.editor_mut()
            .subscribe(move |e| sink.borrow_mut().push(e.clone()));
        events
    }

    // ========================================================================
    // Document setup
    // ========================================================================

    pub fn shape(&mut self, x: f32, y: f32, w: f32, h: f32) -> ShapeId {
        self.editor_mut()
            .create_shapes(vec![ShapeDef::geo(x, y, w, h)])[0]
    }

    pub fn group(&mut self) -> ShapeId {
        self.editor_mut().create_shapes(vec![ShapeDef {
            kind: Some(ShapeKind::group()),
            ..Default::default()
        }])[0]
    }

    pub fn child(&mut self, group: ShapeId, x: f32, y: f32, w: f32, h: f32) -> ShapeId {
        let mut def = ShapeDef::geo(x, y, w, h);
        def.parent = ParentId::Shape(group);
        self.editor_mut().create_shapes(vec![def])[0]
    }

    // ========================================================================
    // Scripted input
    // ========================================================================

    fn raw(&mut self, x: f32, y: f32, modifiers: Modifiers) -> RawPointerEvent {
        self.now_ms += 16;
        let mut raw = RawPointerEvent::new(Vec2::new(x, y), PointerId(1), self.now_ms);
        raw.modifiers = modifiers;
        raw
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.press_with(x, y, Modifiers::NONE);
    }

    pub fn press_with(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        let raw = self.raw(x, y, modifiers);
        self.d.pointer_down(raw);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.move_with(x, y, Modifiers::NONE);
    }

    pub fn move_with(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        let raw = self.raw(x, y, modifiers);
        self.d.pointer_move(raw);
    }

    pub fn release(&mut self, x: f32, y: f32) {
        self.release_with(x, y, Modifiers::NONE);
    }

    pub fn release_with(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        let raw = self.raw(x, y, modifiers);
        self.d.pointer_up(raw);
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.click_with(x, y, Modifiers::NONE);
    }

    pub fn click_with(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        self.press_with(x, y, modifiers);
        self.release_with(x, y, modifiers);
    }

    /// Two clicks well inside the double-click window.
    pub fn double_click(&mut self, x: f32, y: f32) {
        self.click(x, y);
        self.click(x, y);
    }

    /// Press, drag past the threshold with two moves (one to start the drag,
    /// one delivered to the state the drag handed off to), release.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.press(from.0, from.1);
        self.move_to(to.0, to.1);
        self.move_to(to.0, to.1);
        self.release(to.0, to.1);
    }

    /// Let the double-click window lapse before the next click.
    pub fn rest(&mut self) {
        self.now_ms += 1000;
    }

    pub fn escape(&mut self) {
        self.d.key_down("Escape", Modifiers::NONE);
    }
}
