//! Input configuration.
//!
//! The drag threshold and double-click windows are platform-tuned values, so
//! they are configuration rather than hardcoded. Defaults come from
//! `constants` and can be overridden by deserializing from a settings file.

use crate::constants::{DOUBLE_CLICK_MS, DOUBLE_CLICK_TOLERATE_PX, DRAG_THRESHOLD_PX};
use serde::{Deserialize, Serialize};

/// Tunables for gesture classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Screen-space distance before a pointer-down becomes a drag.
    pub drag_threshold_px: f32,
    /// Time window for double-click detection, in milliseconds.
    pub double_click_ms: u64,
    /// Positional tolerance for double-click detection, in pixels.
    pub double_click_tolerate_px: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            double_click_ms: DOUBLE_CLICK_MS,
            double_click_tolerate_px: DOUBLE_CLICK_TOLERATE_PX,
        }
    }
}
