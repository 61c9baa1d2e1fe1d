//! Orthogonal wire routing and the interactive wire drawing tool.

use crate::graph::PointId;
use crate::snap::{GRID_SIZE, axis_grid_snap};
use crate::wire::{Wire, WireSegment};
use kurbo::Point;
use uuid::Uuid;

/// Route a canonical two-segment L between two world points.
///
/// The path runs horizontally from `from` to the bend at
/// `(to.x, from.y)`, then vertically down to `to`. Collinear endpoints
/// collapse to a single straight segment.
pub fn l_route(from: Point, to: Point) -> Vec<WireSegment> {
    if from == to {
        return Vec::new();
    }
    if from.x == to.x || from.y == to.y {
        return vec![WireSegment::new(from, to)];
    }
    let bend = Point::new(to.x, from.y);
    vec![WireSegment::new(from, bend), WireSegment::new(bend, to)]
}

/// A wire being drawn interactively.
#[derive(Debug, Clone)]
pub struct WireInProgress {
    /// Endpoint id of the source terminal.
    pub source_id: PointId,
    /// Exact world position of the source terminal.
    pub anchor: Point,
    /// Segments confirmed so far.
    pub segments: Vec<WireSegment>,
    /// Axis-snapped preview from the last bend to the cursor.
    pub preview: Option<WireSegment>,
}

impl WireInProgress {
    /// Start of the next segment: the last confirmed bend, or the
    /// anchor when none exist yet.
    pub fn tail(&self) -> Point {
        self.segments.last().map(|s| s.end).unwrap_or(self.anchor)
    }
}

/// State of the interactive wire tool.
#[derive(Debug, Clone, Default)]
pub enum WireToolState {
    #[default]
    Idle,
    Drawing(WireInProgress),
}

/// The interactive wire drawing state machine.
///
/// `Idle -> Drawing` on a press at a valid source terminal; presses on
/// empty canvas confirm the previewed segment as a bend; a press on a
/// valid target terminal completes the wire; Escape discards it.
#[derive(Debug, Clone, Default)]
pub struct WireTool {
    state: WireToolState,
}

impl WireTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, WireToolState::Drawing(_))
    }

    pub fn state(&self) -> &WireToolState {
        &self.state
    }

    /// The wire in progress, if any.
    pub fn in_progress(&self) -> Option<&WireInProgress> {
        match &self.state {
            WireToolState::Idle => None,
            WireToolState::Drawing(wip) => Some(wip),
        }
    }

    /// Anchor a new wire at a source terminal. Ignored while a wire is
    /// already in progress.
    pub fn begin(&mut self, source_id: PointId, anchor: Point) {
        if self.is_drawing() {
            log::debug!("wire tool already drawing; ignoring begin at {anchor:?}");
            return;
        }
        log::debug!("wire drawing started from `{source_id}`");
        self.state = WireToolState::Drawing(WireInProgress {
            source_id,
            anchor,
            segments: Vec::new(),
            preview: None,
        });
    }

    /// Recompute the preview segment toward the cursor.
    ///
    /// The segment is forced onto the dominant axis and its far
    /// endpoint is snapped to the grid.
    pub fn update_preview(&mut self, cursor_world: Point) {
        let WireToolState::Drawing(wip) = &mut self.state else {
            return;
        };
        let tail = wip.tail();
        let end = axis_grid_snap(tail, cursor_world, GRID_SIZE);
        wip.preview = (end != tail).then(|| WireSegment::new(tail, end));
    }

    /// Confirm the previewed segment as a permanent bend and start the
    /// next segment from there.
    pub fn confirm_bend(&mut self) {
        let WireToolState::Drawing(wip) = &mut self.state else {
            return;
        };
        if let Some(segment) = wip.preview.take() {
            wip.segments.push(segment);
        }
    }

    /// Complete the wire at a target terminal.
    ///
    /// The final segment ends exactly at the terminal's true world
    /// position; unlike interior bends it is not grid-snapped. Returns
    /// `None` when nothing is being drawn.
    pub fn finish(&mut self, target_id: PointId, target_position: Point) -> Option<Wire> {
        let WireToolState::Drawing(mut wip) = std::mem::take(&mut self.state) else {
            return None;
        };
        let tail = wip.tail();
        if tail != target_position {
            wip.segments.push(WireSegment::new(tail, target_position));
        }
        log::debug!(
            "wire completed from `{}` to `{target_id}` with {} segments",
            wip.source_id,
            wip.segments.len()
        );
        Some(Wire::new(
            format!("wire-{}", Uuid::new_v4()),
            wip.source_id,
            target_id,
            wip.segments,
            false,
        ))
    }

    /// Discard the wire in progress.
    pub fn cancel(&mut self) {
        if self.is_drawing() {
            log::debug!("wire drawing cancelled");
        }
        self.state = WireToolState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l_route_two_segments() {
        let segments = l_route(Point::new(0.0, 0.0), Point::new(100.0, 80.0));
        assert_eq!(segments.len(), 2);
        // Horizontal first, then vertical, bending at (to.x, from.y).
        assert_eq!(segments[0].start, Point::new(0.0, 0.0));
        assert_eq!(segments[0].end, Point::new(100.0, 0.0));
        assert_eq!(segments[1].start, Point::new(100.0, 0.0));
        assert_eq!(segments[1].end, Point::new(100.0, 80.0));
        assert!(segments.iter().all(|s| s.is_axis_aligned()));
    }

    #[test]
    fn test_l_route_collinear_is_single_segment() {
        let segments = l_route(Point::new(0.0, 40.0), Point::new(120.0, 40.0));
        assert_eq!(segments.len(), 1);
        let segments = l_route(Point::new(7.0, 0.0), Point::new(7.0, 90.0));
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_l_route_degenerate() {
        assert!(l_route(Point::new(5.0, 5.0), Point::new(5.0, 5.0)).is_empty());
    }

    #[test]
    fn test_drawing_lifecycle() {
        let mut tool = WireTool::new();
        assert!(!tool.is_drawing());

        tool.begin("c1".to_string(), Point::new(3.0, 7.0));
        assert!(tool.is_drawing());

        // Mostly-horizontal move: preview snaps to the x grid.
        tool.update_preview(Point::new(68.0, 12.0));
        let wip = tool.in_progress().unwrap();
        assert_eq!(
            wip.preview,
            Some(WireSegment::new(Point::new(3.0, 7.0), Point::new(60.0, 7.0)))
        );

        tool.confirm_bend();
        let wip = tool.in_progress().unwrap();
        assert_eq!(wip.segments.len(), 1);
        assert!(wip.preview.is_none());
        assert_eq!(wip.tail(), Point::new(60.0, 7.0));

        // Vertical leg, then finish at an off-grid terminal.
        tool.update_preview(Point::new(63.0, 95.0));
        tool.confirm_bend();
        let wire = tool.finish("p1".to_string(), Point::new(61.5, 103.2)).unwrap();

        assert!(!tool.is_drawing());
        assert_eq!(wire.segments.len(), 3);
        assert_eq!(wire.end(), Some(Point::new(61.5, 103.2)));
        assert!(wire.is_connected());
        assert_eq!(wire.source_point_id, "c1");
        assert_eq!(wire.target_point_id, "p1");
    }

    #[test]
    fn test_interior_bends_grid_snapped() {
        let mut tool = WireTool::new();
        tool.begin("c1".to_string(), Point::new(0.0, 0.0));
        tool.update_preview(Point::new(47.0, 3.0));
        tool.confirm_bend();
        tool.update_preview(Point::new(41.0, 77.0));
        tool.confirm_bend();

        let wip = tool.in_progress().unwrap();
        assert_eq!(wip.segments[0].end, Point::new(40.0, 0.0));
        assert_eq!(wip.segments[1].end, Point::new(40.0, 80.0));
    }

    #[test]
    fn test_cancel_discards() {
        let mut tool = WireTool::new();
        tool.begin("c1".to_string(), Point::ZERO);
        tool.update_preview(Point::new(50.0, 0.0));
        tool.confirm_bend();
        tool.cancel();

        assert!(!tool.is_drawing());
        assert!(tool.finish("p1".to_string(), Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_begin_while_drawing_ignored() {
        let mut tool = WireTool::new();
        tool.begin("c1".to_string(), Point::ZERO);
        tool.begin("c2".to_string(), Point::new(99.0, 99.0));

        assert_eq!(tool.in_progress().unwrap().source_id, "c1");
    }

    #[test]
    fn test_finish_straight_from_anchor() {
        // No bends confirmed: a single segment straight to the target.
        let mut tool = WireTool::new();
        tool.begin("c1".to_string(), Point::new(0.0, 0.0));
        let wire = tool.finish("p1".to_string(), Point::new(25.0, 33.0)).unwrap();
        assert_eq!(wire.segments.len(), 1);
        assert_eq!(wire.start(), Some(Point::new(0.0, 0.0)));
        assert_eq!(wire.end(), Some(Point::new(25.0, 33.0)));
    }
}
