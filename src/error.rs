//! Error types for the input core.
//!
//! Expected input never errors: stale shape ids, unknown transition targets,
//! missing handlers and malformed pointer releases are all no-ops. The only
//! conditions surfaced here are programming errors in a tool's state tree
//! (caught at construction time) and reportable command-surface misuse.

use crate::types::ShapeId;
use thiserror::Error;

/// Errors from the editor command surface.
///
/// These are reported, never fatal: the offending part of a batch is skipped
/// and the rest of the batch is applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// An explicitly provided shape id already exists in the store.
    #[error("shape id collision: {0}")]
    IdCollision(ShapeId),

    /// A shape definition referenced a parent that is not in the store.
    #[error("unknown parent shape: {0}")]
    UnknownParent(ShapeId),
}

/// Structural errors in a tool's state tree, surfaced when the tree is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// A node declared an initial child id it never registered.
    #[error("state '{node}' declares unknown initial child '{initial}'")]
    UnknownInitialChild { node: &'static str, initial: &'static str },

    /// Two sibling states were registered with the same id.
    #[error("state '{node}' has duplicate child id '{child}'")]
    DuplicateChildId { node: &'static str, child: &'static str },

    /// A tool id was requested that no constructor was registered for.
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
}
