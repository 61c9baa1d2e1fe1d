//! CircuitInk Render Library
//!
//! Drawing surface abstraction and the scene painter for CircuitInk.
//! Hosts supply a [`DrawSurface`] backend; the painter turns one canvas
//! session into screen-space draw calls against it.

mod painter;
mod recording;
mod surface;

pub use painter::{POINT_DRAW_RADIUS, Painter, Palette};
pub use recording::{DrawCmd, RecordingSurface};
pub use surface::{DrawSurface, StrokeStyle};
