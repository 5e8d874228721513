//! Structural validation and lifecycle of tool state trees, exercised
//! through the public machine and registry API.

use sketchboard::machine::{Handlers, StateNode};
use sketchboard::types::{EventInfo, EventKind};
use sketchboard::{Editor, ToolError, ToolRegistry};

#[test]
fn test_custom_tool_registration_replaces_builtin() {
    fn stub() -> Result<StateNode, ToolError> {
        StateNode::branch(
            "geo",
            Handlers::default(),
            "idle",
            vec![StateNode::leaf("idle", Handlers::default())],
        )
    }

    let mut registry = ToolRegistry::with_defaults();
    registry.register("geo", stub);
    assert!(registry.contains("geo"));
    let tree = registry.build("geo").expect("stub builds");
    assert_eq!(tree.id(), "geo");
}

#[test]
fn test_broken_tool_tree_fails_at_construction() {
    let result = StateNode::branch(
        "broken",
        Handlers::default(),
        "nowhere",
        vec![StateNode::leaf("idle", Handlers::default())],
    );
    assert_eq!(
        result.unwrap_err(),
        ToolError::UnknownInitialChild {
            node: "broken",
            initial: "nowhere"
        }
    );
}

#[test]
fn test_built_in_trees_enter_their_idle_state() {
    let registry = ToolRegistry::with_defaults();
    let mut editor = Editor::new();
    let info = EventInfo::synthetic(EventKind::Complete);

    for tool in ["select", "geo"] {
        let mut root = registry.build(tool).expect("built-in tool");
        root.enter(&mut editor, &info);
        assert_eq!(root.active_path(), vec![tool, "idle"]);
        root.exit(&mut editor, &info);
    }
}
