//! Viewport transform between world and screen coordinates.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Multiplicative zoom step applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.07;

/// Maps between the unbounded world coordinate space and finite screen
/// pixels.
///
/// The convention is center-anchored: the world point `offset` appears
/// at the center of the screen, and world distances are multiplied by
/// `scale`. [`Viewport::world_to_screen`] and
/// [`Viewport::screen_to_world`] are exact algebraic inverses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current zoom level. Strictly positive at all times.
    scale: f64,
    /// World point shown at the screen center.
    pub offset: Vec2,
    /// Half of the screen size in pixels.
    half_extent: Vec2,
    /// Optional lower bound on scale. Zoom-out is unbounded when `None`.
    pub min_scale: Option<f64>,
    /// Optional upper bound on scale. Zoom-in is unbounded when `None`.
    pub max_scale: Option<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            half_extent: Vec2::new(400.0, 300.0),
            min_scale: None,
            max_scale: None,
        }
    }
}

impl Viewport {
    /// Create a viewport with default scale and an 800x600 screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current zoom level.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the zoom level directly.
    ///
    /// Non-positive or non-finite values are rejected and the previous
    /// scale is kept; configured min/max bounds are applied.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("rejected invalid viewport scale {scale}");
            return;
        }
        self.scale = self.clamp_scale(scale);
    }

    /// Update the screen pixel dimensions.
    ///
    /// Only the screen-space half-extent changes; world content is
    /// unaffected.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.half_extent = Vec2::new(size.width / 2.0, size.height / 2.0);
    }

    /// Full screen size in pixels.
    pub fn screen_size(&self) -> Size {
        Size::new(self.half_extent.x * 2.0, self.half_extent.y * 2.0)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            (world.x - self.offset.x) * self.scale + self.half_extent.x,
            (world.y - self.offset.y) * self.scale + self.half_extent.y,
        )
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.half_extent.x) / self.scale + self.offset.x,
            (screen.y - self.half_extent.y) / self.scale + self.offset.y,
        )
    }

    /// Pan by a pointer displacement in screen pixels.
    ///
    /// Dividing by the scale keeps panning speed visually constant
    /// regardless of zoom level.
    pub fn pan(&mut self, delta_screen: Vec2) {
        self.offset -= delta_screen / self.scale;
    }

    /// Zoom by an arbitrary factor, keeping the given screen point
    /// fixed.
    ///
    /// The world point under `screen_point` maps to the same pixel
    /// before and after the zoom; only points away from the cursor
    /// move.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("rejected invalid zoom factor {factor}");
            return;
        }
        let new_scale = self.clamp_scale(self.scale * factor);
        if new_scale == self.scale {
            return;
        }

        let world_before = self.screen_to_world(screen_point);
        self.scale = new_scale;
        let world_after = self.screen_to_world(screen_point);

        // Shift the offset so world_before lands back on screen_point.
        self.offset += world_before - world_after;
    }

    /// Apply one wheel notch of zoom at the cursor.
    pub fn zoom_step(&mut self, screen_point: Point, zoom_in: bool) {
        let factor = if zoom_in { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        self.zoom_at(screen_point, factor);
    }

    /// Reset to the default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = self.clamp_scale(1.0);
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        let mut s = scale;
        if let Some(min) = self.min_scale {
            s = s.max(min);
        }
        if let Some(max) = self.max_scale {
            s = s.min(max);
        }
        s
    }
}
