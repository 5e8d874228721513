//! Coordinate conversion between screen space and page space.
//!
//! Page space is where shapes live; screen space is device-independent
//! pixels. Drag thresholds and double-click tolerances are screen-space so
//! they feel the same at every zoom level.

use crate::geom::Vec2;

/// Viewport transform: page = (screen - offset) / zoom.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    #[inline]
    pub fn screen_to_page(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x - self.offset.x) / self.zoom,
            (screen.y - self.offset.y) / self.zoom,
        )
    }

    #[inline]
    pub fn page_to_screen(&self, page: Vec2) -> Vec2 {
        Vec2::new(
            page.x * self.zoom + self.offset.x,
            page.y * self.zoom + self.offset.y,
        )
    }
}
