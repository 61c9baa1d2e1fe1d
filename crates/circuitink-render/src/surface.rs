//! Drawing surface trait abstraction.

use kurbo::{Point, Rect};
use peniko::Color;

/// How a stroked line is dashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

/// A backend-neutral drawing surface.
///
/// All coordinates are screen pixels; the painter has already applied
/// the viewport transform. The trait is object safe so hosts can hand
/// in whatever backend they have, or none at all.
pub trait DrawSurface {
    /// Fill the whole surface with a color.
    fn clear(&mut self, color: Color);

    /// Set the stroke used by subsequent [`DrawSurface::line`] calls.
    fn set_stroke(&mut self, color: Color, width: f64, style: StrokeStyle);

    /// Set the fill used by subsequent filled-shape calls.
    fn set_fill(&mut self, color: Color);

    /// Stroke a straight line.
    fn line(&mut self, from: Point, to: Point);

    /// Fill a circle.
    fn filled_circle(&mut self, center: Point, radius: f64);

    /// Fill an axis-aligned rectangle.
    fn filled_rect(&mut self, rect: Rect);

    /// Draw a text label anchored at its top-left corner.
    fn text(&mut self, position: Point, text: &str, size: f64);
}
