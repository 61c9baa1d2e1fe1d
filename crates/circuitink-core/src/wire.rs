//! Wire geometry and state.

use crate::graph::PointId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One straight piece of a wire polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireSegment {
    pub start: Point,
    pub end: Point,
}

impl WireSegment {
    /// Create a segment between two world points.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Segment length in world units.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    /// Whether the segment is horizontal or vertical.
    pub fn is_axis_aligned(&self) -> bool {
        self.start.x == self.end.x || self.start.y == self.end.y
    }
}

/// A routed connection from a driver terminal to a driven terminal.
///
/// The segments form a connected polyline from the source position to
/// the target position. `state` mirrors the driving control point and
/// is kept in sync by [`crate::graph::CircuitGraph`] on every toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    pub id: String,
    pub segments: Vec<WireSegment>,
    pub source_point_id: PointId,
    pub target_point_id: PointId,
    pub state: bool,
}

impl Wire {
    /// Create a wire with an explicit id.
    pub fn new(
        id: String,
        source_point_id: PointId,
        target_point_id: PointId,
        segments: Vec<WireSegment>,
        state: bool,
    ) -> Self {
        Self {
            id,
            segments,
            source_point_id,
            target_point_id,
            state,
        }
    }

    /// Canonical id for a wire auto-derived from a dependency edge.
    pub fn auto_id(source: &str, target: &str) -> String {
        format!("wire-{source}-to-{target}")
    }

    /// World position where the wire starts.
    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(|s| s.start)
    }

    /// World position where the wire ends.
    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(|s| s.end)
    }

    /// Whether consecutive segments share endpoints.
    pub fn is_connected(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].end == pair[1].start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_length() {
        let seg = WireSegment::new(Point::new(0.0, 0.0), Point::new(30.0, 40.0));
        assert!((seg.length() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_axis_aligned() {
        assert!(WireSegment::new(Point::new(0.0, 5.0), Point::new(90.0, 5.0)).is_axis_aligned());
        assert!(WireSegment::new(Point::new(7.0, 0.0), Point::new(7.0, -4.0)).is_axis_aligned());
        assert!(!WireSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).is_axis_aligned());
    }

    #[test]
    fn test_auto_id() {
        assert_eq!(Wire::auto_id("c1", "p1"), "wire-c1-to-p1");
    }

    #[test]
    fn test_connectivity() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(40.0, 0.0);
        let c = Point::new(40.0, 60.0);
        let wire = Wire::new(
            "w".to_string(),
            "c1".to_string(),
            "p1".to_string(),
            vec![WireSegment::new(a, b), WireSegment::new(b, c)],
            false,
        );
        assert!(wire.is_connected());
        assert_eq!(wire.start(), Some(a));
        assert_eq!(wire.end(), Some(c));
    }
}
