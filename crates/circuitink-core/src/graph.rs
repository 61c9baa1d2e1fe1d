//! The circuit point graph and signal propagation.

use crate::transistor::{Terminal, Transistor};
use crate::wire::Wire;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Identifier for a control/controlled point.
pub type PointId = String;

/// Errors from graph construction and propagation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate point id `{0}`")]
    DuplicateId(PointId),
    #[error("duplicate transistor id `{0}`")]
    DuplicateTransistorId(String),
    #[error("point `{point}` is driven by unknown point `{reference}`")]
    DanglingReference { point: PointId, reference: PointId },
    #[error("point `{point}` is driven by `{reference}`, which is not a control point")]
    NotAControl { point: PointId, reference: PointId },
    #[error("no control point named `{0}`")]
    NoSuchControl(PointId),
}

/// A signal point on the canvas.
///
/// Control points are toggled directly by clicks; controlled points
/// derive their state as the OR of their drivers and are never toggled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CircuitPoint {
    Control {
        id: PointId,
        position: Point,
        state: bool,
    },
    Controlled {
        id: PointId,
        position: Point,
        state: bool,
        driven_by: Vec<PointId>,
    },
}

impl CircuitPoint {
    pub fn id(&self) -> &str {
        match self {
            CircuitPoint::Control { id, .. } | CircuitPoint::Controlled { id, .. } => id,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            CircuitPoint::Control { position, .. }
            | CircuitPoint::Controlled { position, .. } => *position,
        }
    }

    pub fn state(&self) -> bool {
        match self {
            CircuitPoint::Control { state, .. } | CircuitPoint::Controlled { state, .. } => *state,
        }
    }

    pub fn is_control(&self) -> bool {
        matches!(self, CircuitPoint::Control { .. })
    }
}

/// Owns the points, wires and transistors of one canvas session.
///
/// Iteration order everywhere is the insertion order of the definition,
/// which makes hit testing and propagation deterministic.
#[derive(Debug, Clone, Default)]
pub struct CircuitGraph {
    points: Vec<CircuitPoint>,
    wires: Vec<Wire>,
    transistors: Vec<Transistor>,
}

impl CircuitGraph {
    /// Build a graph from a declarative element set.
    ///
    /// Validates ids and dependency references up front: a `driven_by`
    /// entry naming a nonexistent or non-control point is a
    /// configuration error here, never later during propagation. On
    /// success, controlled states are recomputed from the initial
    /// control states and one wire is derived per dependency edge.
    pub fn new(
        points: Vec<CircuitPoint>,
        transistors: Vec<Transistor>,
    ) -> Result<Self, GraphError> {
        let mut seen = HashSet::new();
        for point in &points {
            if !seen.insert(point.id().to_string()) {
                return Err(GraphError::DuplicateId(point.id().to_string()));
            }
        }
        let mut seen = HashSet::new();
        for transistor in &transistors {
            if !seen.insert(transistor.id.clone()) {
                return Err(GraphError::DuplicateTransistorId(transistor.id.clone()));
            }
        }

        let controls: HashMap<&str, bool> = points
            .iter()
            .filter(|p| p.is_control())
            .map(|p| (p.id(), p.state()))
            .collect();
        for point in &points {
            if let CircuitPoint::Controlled { id, driven_by, .. } = point {
                for driver in driven_by {
                    if !controls.contains_key(driver.as_str()) {
                        let err = if points.iter().any(|p| p.id() == driver) {
                            GraphError::NotAControl {
                                point: id.clone(),
                                reference: driver.clone(),
                            }
                        } else {
                            GraphError::DanglingReference {
                                point: id.clone(),
                                reference: driver.clone(),
                            }
                        };
                        return Err(err);
                    }
                }
            }
        }

        let mut graph = Self {
            points,
            wires: Vec::new(),
            transistors,
        };
        graph.propagate();
        graph.wires = graph.derive_wires();
        Ok(graph)
    }

    /// Flip a control point and propagate.
    ///
    /// Every controlled point driven by `control_id` is recomputed as
    /// the OR of all of its drivers, and every wire sourced at
    /// `control_id` mirrors the new state. Returns the control's new
    /// state.
    pub fn toggle(&mut self, control_id: &str) -> Result<bool, GraphError> {
        let new_state = match self
            .points
            .iter_mut()
            .find(|p| p.id() == control_id && p.is_control())
        {
            Some(CircuitPoint::Control { state, .. }) => {
                *state = !*state;
                *state
            }
            _ => return Err(GraphError::NoSuchControl(control_id.to_string())),
        };
        log::debug!("control `{control_id}` toggled to {new_state}");

        self.propagate_from(control_id);
        self.sync_wires_from(control_id, new_state);
        Ok(new_state)
    }

    /// Store a completed wire, mirroring its source's current state.
    pub fn add_wire(&mut self, mut wire: Wire) {
        match self.endpoint_state(&wire.source_point_id) {
            Some(state) => wire.state = state,
            None => {
                log::warn!(
                    "wire `{}` has unknown source `{}`; state defaults to false",
                    wire.id,
                    wire.source_point_id
                );
                wire.state = false;
            }
        }
        self.wires.push(wire);
    }

    /// Current boolean state of a wire endpoint id.
    ///
    /// Resolves plain point ids and composite `transistor.terminal`
    /// ids.
    pub fn endpoint_state(&self, endpoint_id: &str) -> Option<bool> {
        if let Some(point) = self.point(endpoint_id) {
            return Some(point.state());
        }
        let (transistor_id, terminal_name) = endpoint_id.rsplit_once('.')?;
        let terminal = Terminal::from_name(terminal_name)?;
        self.transistor(transistor_id)
            .map(|t| t.terminal_state(terminal))
    }

    pub fn point(&self, id: &str) -> Option<&CircuitPoint> {
        self.points.iter().find(|p| p.id() == id)
    }

    pub fn transistor(&self, id: &str) -> Option<&Transistor> {
        self.transistors.iter().find(|t| t.id == id)
    }

    pub fn points(&self) -> &[CircuitPoint] {
        &self.points
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn transistors(&self) -> &[Transistor] {
        &self.transistors
    }

    /// Recompute every controlled point from the current control
    /// states, then re-mirror all auto-derived wire states.
    fn propagate(&mut self) {
        let controls = self.control_states();
        for point in &mut self.points {
            if let CircuitPoint::Controlled {
                state, driven_by, ..
            } = point
            {
                *state = Self::or_of(&controls, driven_by);
            }
        }
        let controls = self.control_states();
        for wire in &mut self.wires {
            if let Some(state) = controls.get(wire.source_point_id.as_str()) {
                wire.state = *state;
            }
        }
    }

    /// Recompute only the controlled points driven by `control_id`.
    fn propagate_from(&mut self, control_id: &str) {
        let controls = self.control_states();
        for point in &mut self.points {
            if let CircuitPoint::Controlled {
                state, driven_by, ..
            } = point
            {
                if driven_by.iter().any(|d| d == control_id) {
                    *state = Self::or_of(&controls, driven_by);
                }
            }
        }
    }

    fn sync_wires_from(&mut self, source_id: &str, state: bool) {
        for wire in &mut self.wires {
            if wire.source_point_id == source_id {
                wire.state = state;
            }
        }
    }

    fn control_states(&self) -> HashMap<String, bool> {
        self.points
            .iter()
            .filter(|p| p.is_control())
            .map(|p| (p.id().to_string(), p.state()))
            .collect()
    }

    fn or_of(controls: &HashMap<String, bool>, drivers: &[PointId]) -> bool {
        drivers
            .iter()
            .any(|d| controls.get(d.as_str()).copied().unwrap_or(false))
    }

    /// One L-routed wire per (driver, controlled) dependency edge.
    fn derive_wires(&self) -> Vec<Wire> {
        let mut wires = Vec::new();
        for point in &self.points {
            let CircuitPoint::Controlled {
                id,
                position,
                driven_by,
                ..
            } = point
            else {
                continue;
            };
            for driver_id in driven_by {
                let Some(driver) = self.point(driver_id) else {
                    continue;
                };
                wires.push(Wire::new(
                    Wire::auto_id(driver_id, id),
                    driver_id.clone(),
                    id.clone(),
                    crate::routing::l_route(driver.position(), *position),
                    driver.state(),
                ));
            }
        }
        wires
    }
}
