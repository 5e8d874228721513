//! Tool state trees.
//!
//! Each tool is a one-level state tree built from `StateNode`s; the
//! registry maps tool ids to tree constructors so the dispatcher can tear
//! one tool down and build the next. New tools register a constructor; the
//! engine and dispatcher are tool-agnostic.

pub mod geo;
pub mod select;

use crate::error::ToolError;
use crate::machine::StateNode;

pub const SELECT: &str = "select";
pub const GEO: &str = "geo";

type ToolCtor = fn() -> Result<StateNode, ToolError>;

/// Tool id to state-tree constructor.
#[derive(Default)]
pub struct ToolRegistry {
    constructors: Vec<(&'static str, ToolCtor)>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in select and geo tools.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SELECT, select::build);
        registry.register(GEO, geo::build);
        registry
    }

    /// Register a constructor, replacing any previous one for the same id.
    pub fn register(&mut self, id: &'static str, ctor: ToolCtor) {
        self.constructors.retain(|(existing, _)| *existing != id);
        self.constructors.push((id, ctor));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.iter().any(|(existing, _)| *existing == id)
    }

    /// Build a fresh state tree for a tool.
    pub fn build(&self, id: &str) -> Result<StateNode, ToolError> {
        let (_, ctor) = self
            .constructors
            .iter()
            .find(|(existing, _)| *existing == id)
            .ok_or_else(|| ToolError::UnknownTool(id.to_string()))?;
        ctor()
    }
}
