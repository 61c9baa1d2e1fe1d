//! Declarative circuit definitions.
//!
//! A definition is the serialized form of a circuit: points with their
//! dependency lists plus transistors. Building a definition validates
//! it and produces a live [`CircuitGraph`].

use crate::graph::{CircuitGraph, CircuitPoint, GraphError, PointId};
use crate::transistor::{Orientation, Transistor};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a circuit definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to parse circuit definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Serialized form of a signal point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointDef {
    Control {
        id: PointId,
        position: Point,
        #[serde(default)]
        state: bool,
    },
    Controlled {
        id: PointId,
        position: Point,
        #[serde(default)]
        driven_by: Vec<PointId>,
    },
}

/// Serialized form of a transistor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransistorDef {
    pub id: String,
    pub center: Point,
    pub orientation: Orientation,
}

/// A complete declarative circuit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircuitDef {
    #[serde(default)]
    pub points: Vec<PointDef>,
    #[serde(default)]
    pub transistors: Vec<TransistorDef>,
}

impl CircuitDef {
    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the definition to pretty JSON.
    pub fn to_json(&self) -> Result<String, DefinitionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a live graph from the definition.
    ///
    /// Validation happens here: duplicate ids and `driven_by` entries
    /// that name a nonexistent or non-control point are rejected before
    /// any interaction can observe them.
    pub fn build(&self) -> Result<CircuitGraph, DefinitionError> {
        let points = self
            .points
            .iter()
            .map(|def| match def {
                PointDef::Control {
                    id,
                    position,
                    state,
                } => CircuitPoint::Control {
                    id: id.clone(),
                    position: *position,
                    state: *state,
                },
                PointDef::Controlled {
                    id,
                    position,
                    driven_by,
                } => CircuitPoint::Controlled {
                    id: id.clone(),
                    position: *position,
                    state: false,
                    driven_by: driven_by.clone(),
                },
            })
            .collect();
        let transistors = self
            .transistors
            .iter()
            .map(|def| Transistor::new(def.id.clone(), def.center, def.orientation))
            .collect();

        let graph = CircuitGraph::new(points, transistors).inspect_err(|err| {
            log::error!("circuit definition rejected: {err}");
        })?;
        log::info!(
            "loaded circuit with {} points, {} transistors, {} wires",
            graph.points().len(),
            graph.transistors().len(),
            graph.wires().len()
        );
        Ok(graph)
    }
}
