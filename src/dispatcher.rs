//! The dispatcher: single entry point from the platform boundary.
//!
//! Raw pointer and key events are normalized, fed synchronously into the
//! active tool's root state node, and any tool change a handler queued is
//! applied once the dispatch has run to completion. Every handler therefore
//! runs against a consistent snapshot: nothing executes concurrently with a
//! mutation.

use crate::editor::{Editor, ToolChange};
use crate::error::ToolError;
use crate::input::{InputNormalizer, RawPointerEvent};
use crate::machine::StateNode;
use crate::tools::ToolRegistry;
use crate::types::{EventInfo, EventKind, Modifiers, Target};
use tracing::{debug, trace, warn};

/// Feeds normalized events into the active tool's state tree, in order,
/// synchronously.
pub struct Dispatcher {
    editor: Editor,
    registry: ToolRegistry,
    normalizer: InputNormalizer,
    root: StateNode,
    enabled: bool,
}

impl Dispatcher {
    /// Build a dispatcher starting in the select tool.
    pub fn new(editor: Editor, registry: ToolRegistry) -> Result<Self, ToolError> {
        Self::with_tool(editor, registry, crate::tools::SELECT)
    }

    /// Build a dispatcher starting in an arbitrary registered tool.
    pub fn with_tool(
        mut editor: Editor,
        registry: ToolRegistry,
        tool: &'static str,
    ) -> Result<Self, ToolError> {
        let mut root = registry.build(tool)?;
        let info = EventInfo::synthetic(EventKind::Complete);
        root.enter(&mut editor, &info);
        editor.note_tool_changed(tool);
        Ok(Self {
            editor,
            registry,
            normalizer: InputNormalizer::default(),
            root,
            enabled: true,
        })
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn normalizer_mut(&mut self) -> &mut InputNormalizer {
        &mut self.normalizer
    }

    /// Path from the tool root to the active leaf.
    pub fn active_path(&self) -> Vec<&'static str> {
        self.root.active_path()
    }

    /// While disabled, all dispatch entry points are no-ops. Stopping
    /// propagation and preventing platform defaults stay external concerns.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    pub fn pointer_down(&mut self, raw: RawPointerEvent) {
        if !self.enabled {
            return;
        }
        let page = self.normalizer.camera.screen_to_page(raw.screen);
        let target = self.editor.target_at_point(page);
        let Some(info) = self
            .normalizer
            .pointer_down(&mut self.editor.inputs, raw, target)
        else {
            return;
        };
        self.dispatch(info);
    }

    pub fn pointer_move(&mut self, raw: RawPointerEvent) {
        if !self.enabled {
            return;
        }
        // while a pointer is captured the normalizer keeps its target; the
        // hover resolution only matters for uncaptured moves
        let hover = if self.editor.inputs.is_pointer_down() {
            Target::Canvas
        } else {
            let page = self.normalizer.camera.screen_to_page(raw.screen);
            self.editor.target_at_point(page)
        };
        let config = self.editor.config().clone();
        let Some(info) =
            self.normalizer
                .pointer_move(&mut self.editor.inputs, &config, raw, hover)
        else {
            return;
        };
        self.dispatch(info);
    }

    pub fn pointer_up(&mut self, raw: RawPointerEvent) {
        if !self.enabled {
            return;
        }
        let config = self.editor.config().clone();
        let Some((up, double)) = self
            .normalizer
            .pointer_up(&mut self.editor.inputs, &config, raw)
        else {
            return;
        };
        self.dispatch(up);
        if let Some(double) = double {
            self.dispatch(double);
        }
    }

    /// Key events. Escape doubles as cancel and Enter as complete, after
    /// the key event itself has been delivered.
    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) {
        if !self.enabled {
            return;
        }
        let mut info = self.info_from_inputs(EventKind::KeyDown(key.to_string()));
        info.modifiers = modifiers;
        self.dispatch(info);
        match key {
            "Escape" => self.cancel(),
            "Enter" => self.complete(),
            _ => {}
        }
    }

    /// Abort the gesture in progress.
    pub fn cancel(&mut self) {
        if !self.enabled {
            return;
        }
        let info = self.info_from_inputs(EventKind::Cancel);
        self.dispatch(info);
    }

    /// End the gesture in progress as a success.
    pub fn complete(&mut self) {
        if !self.enabled {
            return;
        }
        let info = self.info_from_inputs(EventKind::Complete);
        self.dispatch(info);
    }

    /// External interruption (e.g. the surrounding app stole the pointer).
    pub fn interrupt(&mut self) {
        if !self.enabled {
            return;
        }
        let info = self.info_from_inputs(EventKind::Interrupt);
        self.dispatch(info);
    }

    /// Switch tools from outside a dispatch. Requesting the tool that is
    /// already current still tears the tree down and rebuilds it at its
    /// initial state, abandoning any gesture in progress.
    pub fn set_current_tool(
        &mut self,
        tool: &'static str,
        options: crate::editor::ToolEnterOptions,
    ) {
        self.editor.set_current_tool(tool, options);
        let info = self.info_from_inputs(EventKind::Interrupt);
        self.apply_pending_tool_changes(&info);
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn info_from_inputs(&self, kind: EventKind) -> EventInfo {
        EventInfo {
            kind,
            target: Target::Canvas,
            page: self.editor.inputs.current_page,
            screen: self.editor.inputs.current_screen,
            modifiers: self.editor.inputs.modifiers,
            pointer_id: Default::default(),
        }
    }

    fn dispatch(&mut self, info: EventInfo) {
        trace!(kind = ?info.kind, target = ?info.target, "dispatch");
        if let Some(unresolved) = self.root.handle_event(&mut self.editor, &info) {
            // requests that race past the root are expected, never fatal
            warn!(target = unresolved, "dropping transition unresolved at root");
        }
        self.apply_pending_tool_changes(&info);
    }

    fn apply_pending_tool_changes(&mut self, info: &EventInfo) {
        // entering a tool can queue another change; bound the cascade
        for _ in 0..8 {
            let Some(change) = self.editor.take_pending_tool_change() else {
                return;
            };
            self.activate_tool(change, info);
        }
        warn!("tool change cascade did not settle; stopping");
    }

    fn activate_tool(&mut self, change: ToolChange, info: &EventInfo) {
        let mut next_root = match self.registry.build(change.tool) {
            Ok(root) => root,
            Err(error) => {
                warn!(%error, "ignoring change to unknown tool");
                return;
            }
        };
        debug!(tool = change.tool, "activating tool");
        self.root.exit(&mut self.editor, info);
        self.editor.note_tool_changed(change.tool);
        next_root.enter(&mut self.editor, info);

        let options = change.options;
        if let Some(target) = options.target {
            // entering idle cleared the gesture scratch; install the
            // handoff data before jumping into the target state
            let gesture = &mut self.editor.gesture;
            gesture.mark = options.mark;
            gesture.is_creating = options.is_creating;
            gesture.on_interaction_end = options.on_interaction_end;
            if let Some(handle) = options.handle {
                gesture.handle = handle;
            }
            next_root.transition(target, &mut self.editor, info);
        }
        self.root = next_root;
    }
}
