//! Pointer hit testing against circuit elements.

use crate::graph::PointId;
use crate::transistor::Terminal;
use kurbo::Point;

/// Tolerance radius for hitting a control/controlled point, in world
/// units (so it scales with zoom on screen).
pub const POINT_HIT_RADIUS: f64 = 15.0;

/// An interactive element resolved from a pointer position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// A control or controlled point.
    Point(PointId),
    /// A named terminal on a transistor.
    Terminal {
        transistor: String,
        terminal: Terminal,
    },
}

impl HitTarget {
    /// Id used when this target is a wire endpoint.
    ///
    /// Points keep their own id; terminals get a composite
    /// `transistor.terminal` id.
    pub fn wire_endpoint_id(&self) -> String {
        match self {
            HitTarget::Point(id) => id.clone(),
            HitTarget::Terminal {
                transistor,
                terminal,
            } => format!("{transistor}.{}", terminal.name()),
        }
    }
}

/// Resolve a query position to a candidate within `radius`.
///
/// Distance is Euclidean and the boundary is inclusive
/// (`distance <= radius`). The first candidate in iteration order that
/// falls inside wins: deterministic, but order-dependent.
pub fn find_nearest<I, T>(query: Point, candidates: I, radius: f64) -> Option<T>
where
    I: IntoIterator<Item = (T, Point)>,
{
    candidates
        .into_iter()
        .find(|(_, position)| (*position - query).hypot() <= radius)
        .map(|(id, _)| id)
}
