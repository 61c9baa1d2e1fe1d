//! CircuitInk Core Library
//!
//! Platform-agnostic data structures and logic for the CircuitInk
//! circuit-diagram canvas: viewport transform, signal propagation,
//! wire routing, hit testing and the pointer interaction machine.

pub mod controller;
pub mod definition;
pub mod graph;
pub mod hit;
pub mod input;
pub mod redraw;
pub mod routing;
pub mod snap;
pub mod transistor;
pub mod viewport;
pub mod wire;

pub use controller::{InteractionController, InteractionMode};
pub use definition::{CircuitDef, DefinitionError, PointDef, TransistorDef};
pub use graph::{CircuitGraph, CircuitPoint, GraphError, PointId};
pub use hit::{HitTarget, POINT_HIT_RADIUS, find_nearest};
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use redraw::RedrawScheduler;
pub use routing::{WireInProgress, WireTool, WireToolState, l_route};
pub use snap::{GRID_SIZE, axis_snap, snap_coord, snap_to_grid};
pub use transistor::{
    BODY_HEIGHT, BODY_WIDTH, Orientation, TERMINAL_RADIUS, Terminal, Transistor,
};
pub use viewport::{Viewport, ZOOM_STEP};
pub use wire::{Wire, WireSegment};
