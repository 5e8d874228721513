//! Input-handling core for a 2D canvas editor.
//!
//! The crate turns raw platform pointer and keyboard events into document
//! mutations through three layers:
//!
//! - the [`input`] module normalizes raw events into canonical records,
//!   handling drag thresholds, double-click detection and pointer capture;
//! - the [`machine`] and [`tools`] modules interpret those records through
//!   a hierarchical state machine, one tree per tool;
//! - the [`editor`] module is the command surface the tools mutate the
//!   document through: shape CRUD, selection, focus layer, undo marks.
//!
//! The [`dispatcher::Dispatcher`] ties the layers together and is the single
//! entry point an embedding platform feeds events into. All processing is
//! synchronous; a dispatch runs to completion before the next one starts.

pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod editor;
pub mod error;
pub mod geom;
pub mod hit_testing;
pub mod history;
pub mod input;
pub mod machine;
pub mod selection;
pub mod spatial_index;
pub mod store;
pub mod tools;
pub mod types;

pub use config::InputConfig;
pub use dispatcher::Dispatcher;
pub use editor::{Editor, EditorEvent, ToolEnterOptions};
pub use error::{EditorError, ToolError};
pub use geom::{Box2, Vec2};
pub use input::{Camera, RawPointerEvent};
pub use tools::ToolRegistry;
pub use types::{
    EventInfo, EventKind, Modifiers, ParentId, PointerId, ResizeHandle, Shape, ShapeDef, ShapeId,
    ShapeKind, ShapePatch, Target, ZIndex,
};
