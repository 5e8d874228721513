//! Input normalization for the canvas.
//!
//! Converts raw platform pointer events into the canonical `EventInfo`
//! records the tool state trees consume, and tracks the transient input
//! state that classification needs: pointer capture, the drag flag, and the
//! double-click window.
//!
//! ## Modules
//!
//! - `state` - transient input state (capture, drag flag, click record)
//! - `coords` - screen/page coordinate conversion
//! - `normalizer` - raw event to `EventInfo` classification

pub mod coords;
mod normalizer;
mod state;

pub use coords::Camera;
pub use normalizer::{InputNormalizer, RawPointerEvent};
pub use state::InputTracker;
