//! Grid and axis snapping for wire drawing.

use kurbo::Point;

/// Grid step for snapping wire bends (matches the visual grid).
pub const GRID_SIZE: f64 = 20.0;

/// Snap a single coordinate to the nearest grid step.
pub fn snap_coord(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(snap_coord(point.x, grid_size), snap_coord(point.y, grid_size))
}

/// Force the segment from `start` toward `cursor` onto the dominant
/// axis.
///
/// The segment is horizontal when the horizontal displacement exceeds
/// the vertical one, vertical otherwise. Returns the axis-projected far
/// endpoint.
pub fn axis_snap(start: Point, cursor: Point) -> Point {
    let dx = cursor.x - start.x;
    let dy = cursor.y - start.y;
    if dx.abs() > dy.abs() {
        Point::new(cursor.x, start.y)
    } else {
        Point::new(start.x, cursor.y)
    }
}

/// Axis-snap a preview endpoint and quantize its free coordinate to the
/// grid.
///
/// Only the moving coordinate is snapped; the fixed coordinate is
/// inherited from `start`, which may be an unsnapped terminal
/// attachment.
pub fn axis_grid_snap(start: Point, cursor: Point, grid_size: f64) -> Point {
    let projected = axis_snap(start, cursor);
    if projected == start {
        return start;
    }
    if projected.y == start.y {
        Point::new(snap_coord(projected.x, grid_size), start.y)
    } else {
        Point::new(start.x, snap_coord(projected.y, grid_size))
    }
}
