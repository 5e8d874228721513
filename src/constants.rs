//! Crate-wide constants.
//!
//! Centralizes magic numbers and interaction tunables to make the codebase
//! more maintainable and self-documenting. The input-related values are
//! defaults only; `InputConfig` carries the effective values at runtime.

// ============================================================================
// Input Handling
// ============================================================================

/// Screen-space distance (device-independent pixels) the pointer must travel
/// from its down-position before the interaction counts as a drag.
pub const DRAG_THRESHOLD_PX: f32 = 4.0;

/// Maximum time between two pointer-ups for them to count as a double-click.
pub const DOUBLE_CLICK_MS: u64 = 450;

/// Maximum screen-space distance between two pointer-ups for them to count
/// as a double-click.
pub const DOUBLE_CLICK_TOLERATE_PX: f32 = 8.0;

// ============================================================================
// Shape Defaults
// ============================================================================

/// Size given to a geo shape created by a plain click (no drag).
pub const DEFAULT_GEO_SIZE: (f32, f32) = (200.0, 200.0);

/// Initial size of a geo shape created by dragging, before live-resize.
pub const CREATED_SHAPE_SIZE: (f32, f32) = (1.0, 1.0);

/// Smallest box a resize gesture may produce.
pub const MIN_SHAPE_SIZE: f32 = 1.0;

// ============================================================================
// History
// ============================================================================

/// Maximum undo checkpoints to keep.
pub const MAX_HISTORY_MARKS: usize = 50;
