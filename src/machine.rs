//! Hierarchical state-machine engine.
//!
//! A state is data: an id, an optional handler per event capability, child
//! states, and at most one active child. Dispatch is a single generic
//! interpreter, so there are no per-state types and no override chains; a
//! missing handler is a legitimate no-op.
//!
//! A handler requests a state change through `Tx::transition`. The target id
//! is resolved first among the running node's own children, otherwise the
//! request bubbles up and is resolved among the node's siblings. A request
//! that reaches the root unresolved is dropped silently; transition requests
//! can race with interruption, so an unknown target must never be fatal.
//!
//! Event ordering follows parent-first pre-emption: a node runs its own
//! handler, and only forwards the event to its active child when that
//! handler did not switch the active child itself.

use crate::editor::Editor;
use crate::error::ToolError;
use crate::types::{EventInfo, EventKind};
use tracing::{debug, trace, warn};

/// A state handler. Plain function pointers keep the tree a table.
pub type Handler = fn(&mut Tx<'_>, &EventInfo);

/// Per-dispatch context handed to handlers: the command surface plus a slot
/// for at most one transition request.
pub struct Tx<'a> {
    pub editor: &'a mut Editor,
    request: Option<&'static str>,
}

impl<'a> Tx<'a> {
    fn new(editor: &'a mut Editor) -> Self {
        Self {
            editor,
            request: None,
        }
    }

    /// Request a transition to `target`. Resolved among the current state's
    /// children first, then among its siblings.
    pub fn transition(&mut self, target: &'static str) {
        self.request = Some(target);
    }
}

/// Optional handlers for the full event capability set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Handlers {
    pub on_enter: Option<Handler>,
    pub on_exit: Option<Handler>,
    pub on_pointer_down: Option<Handler>,
    pub on_pointer_move: Option<Handler>,
    pub on_pointer_up: Option<Handler>,
    pub on_double_click: Option<Handler>,
    pub on_key_down: Option<Handler>,
    pub on_cancel: Option<Handler>,
    pub on_complete: Option<Handler>,
    pub on_interrupt: Option<Handler>,
}

impl Handlers {
    fn for_kind(&self, kind: &EventKind) -> Option<Handler> {
        match kind {
            EventKind::PointerDown => self.on_pointer_down,
            EventKind::PointerMove => self.on_pointer_move,
            EventKind::PointerUp => self.on_pointer_up,
            EventKind::DoubleClick => self.on_double_click,
            EventKind::KeyDown(_) => self.on_key_down,
            EventKind::Cancel => self.on_cancel,
            EventKind::Complete => self.on_complete,
            EventKind::Interrupt => self.on_interrupt,
        }
    }
}

/// A node in a tool's state tree.
#[derive(Debug)]
pub struct StateNode {
    id: &'static str,
    handlers: Handlers,
    children: Vec<StateNode>,
    active: Option<usize>,
    initial: Option<&'static str>,
}

impl StateNode {
    /// A leaf state with no children.
    pub fn leaf(id: &'static str, handlers: Handlers) -> Self {
        Self {
            id,
            handlers,
            children: Vec::new(),
            active: None,
            initial: None,
        }
    }

    /// A branch state. `initial` names the child entered by default and must
    /// be one of `children`; anything else is a structural error surfaced
    /// here, at construction time.
    pub fn branch(
        id: &'static str,
        handlers: Handlers,
        initial: &'static str,
        children: Vec<StateNode>,
    ) -> Result<Self, ToolError> {
        for (i, child) in children.iter().enumerate() {
            if children[..i].iter().any(|c| c.id == child.id) {
                return Err(ToolError::DuplicateChildId {
                    node: id,
                    child: child.id,
                });
            }
        }
        if !children.iter().any(|c| c.id == initial) {
            return Err(ToolError::UnknownInitialChild { node: id, initial });
        }
        Ok(Self {
            id,
            handlers,
            children,
            active: None,
            initial: Some(initial),
        })
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Path from this node to the active leaf, e.g. `["select", "idle"]`.
    pub fn active_path(&self) -> Vec<&'static str> {
        let mut path = vec![self.id];
        let mut node = self;
        while let Some(i) = node.active {
            node = &node.children[i];
            path.push(node.id);
        }
        path
    }

    fn child_index(&self, id: &str) -> Option<usize> {
        self.children.iter().position(|c| c.id == id)
    }

    fn run(&self, handler: Option<Handler>, editor: &mut Editor, info: &EventInfo) -> Option<&'static str> {
        let handler = handler?;
        let mut tx = Tx::new(editor);
        handler(&mut tx, info);
        tx.request
    }

    /// Enter this node: run its enter handler, then descend into its initial
    /// child chain. An enter handler may redirect to a different child.
    pub fn enter(&mut self, editor: &mut Editor, info: &EventInfo) {
        trace!(state = self.id, "enter");
        let redirect = self.run(self.handlers.on_enter, editor, info);
        let target = match redirect {
            Some(t) if self.child_index(t).is_some() => Some(t),
            Some(t) => {
                // sibling redirects cannot be resolved mid-enter
                warn!(state = self.id, target = t, "dropping transition requested during enter");
                self.initial
            }
            None => self.initial,
        };
        if let Some(target) = target {
            self.transition(target, editor, info);
        }
    }

    /// Exit this node: exit the active descendant chain deepest-first, then
    /// run this node's exit handler.
    pub fn exit(&mut self, editor: &mut Editor, info: &EventInfo) {
        if let Some(i) = self.active.take() {
            self.children[i].exit(editor, info);
        }
        trace!(state = self.id, "exit");
        self.run(self.handlers.on_exit, editor, info);
    }

    /// Switch the active child to `child_id`. Unknown ids are ignored: a
    /// transition request can race with interruption and must never throw.
    pub fn transition(&mut self, child_id: &str, editor: &mut Editor, info: &EventInfo) {
        let Some(next) = self.child_index(child_id) else {
            warn!(state = self.id, target = child_id, "ignoring transition to unknown child");
            return;
        };
        if let Some(current) = self.active.take() {
            self.children[current].exit(editor, info);
        }
        debug!(state = self.id, child = child_id, "transition");
        self.active = Some(next);
        self.children[next].enter(editor, info);
    }

    /// Dispatch one event through this subtree. Returns an unresolved
    /// sibling-transition request for the caller to apply.
    pub fn handle_event(&mut self, editor: &mut Editor, info: &EventInfo) -> Option<&'static str> {
        if let Some(requested) = self.run(self.handlers.for_kind(&info.kind), editor, info) {
            if self.child_index(requested).is_some() {
                // own handler changed the active child: do not forward
                self.transition(requested, editor, info);
                return None;
            }
            return Some(requested);
        }

        if let Some(i) = self.active {
            if let Some(requested) = self.children[i].handle_event(editor, info) {
                if self.child_index(requested).is_some() {
                    self.transition(requested, editor, info);
                } else {
                    return Some(requested);
                }
            }
        }
        None
    }
}
