//! Turns one canvas session into screen-space draw calls.

use crate::surface::{DrawSurface, StrokeStyle};
use circuitink_core::controller::InteractionController;
use circuitink_core::transistor::TERMINAL_RADIUS;
use circuitink_core::viewport::Viewport;
use kurbo::{Point, Rect};
use peniko::Color;

/// Visual radius of a signal point in world units, scaled with zoom on
/// screen.
pub const POINT_DRAW_RADIUS: f64 = 5.0;

/// Scene colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    /// Axis and preview guides.
    pub grid: Color,
    /// High signals.
    pub on: Color,
    /// Low signals.
    pub off: Color,
    /// Transistor bodies and labels.
    pub body: Color,
    /// Wires whose source is low.
    pub wire_off: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(245, 245, 245, 255),
            grid: Color::from_rgba8(38, 111, 255, 255),
            on: Color::from_rgba8(62, 255, 36, 255),
            off: Color::from_rgba8(255, 36, 36, 255),
            body: Color::from_rgba8(61, 61, 61, 255),
            wire_off: Color::from_rgba8(61, 61, 61, 255),
        }
    }
}

/// Paints a whole frame from the controller's current state.
#[derive(Debug, Clone, Default)]
pub struct Painter {
    pub palette: Palette,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint one frame.
    ///
    /// With no surface attached this is a no-op; the session keeps
    /// running headless and a later redraw picks the state up.
    pub fn draw(&self, controller: &InteractionController, surface: Option<&mut dyn DrawSurface>) {
        let Some(surface) = surface else {
            log::trace!("no drawing surface attached; skipping frame");
            return;
        };
        surface.clear(self.palette.background);
        self.draw_axes(controller, surface);
        self.draw_wires(controller, surface);
        self.draw_wire_in_progress(controller, surface);
        self.draw_points(controller, surface);
        self.draw_transistors(controller, surface);
    }

    /// World axes through the origin, as far as they cross the screen.
    fn draw_axes(&self, controller: &InteractionController, surface: &mut dyn DrawSurface) {
        let viewport = &controller.viewport;
        let size = viewport.screen_size();
        let origin = viewport.world_to_screen(Point::ZERO);

        surface.set_stroke(self.palette.grid, 1.0, StrokeStyle::Solid);
        if (0.0..=size.width).contains(&origin.x) {
            surface.line(
                Point::new(origin.x, 0.0),
                Point::new(origin.x, size.height),
            );
        }
        if (0.0..=size.height).contains(&origin.y) {
            surface.line(Point::new(0.0, origin.y), Point::new(size.width, origin.y));
        }
    }

    fn draw_wires(&self, controller: &InteractionController, surface: &mut dyn DrawSurface) {
        let viewport = &controller.viewport;
        for wire in controller.graph.wires() {
            let color = if wire.state {
                self.palette.on
            } else {
                self.palette.wire_off
            };
            surface.set_stroke(color, 2.0, StrokeStyle::Solid);
            for segment in &wire.segments {
                surface.line(
                    viewport.world_to_screen(segment.start),
                    viewport.world_to_screen(segment.end),
                );
            }
        }
    }

    /// Confirmed in-progress segments are solid; the live preview is
    /// dashed.
    fn draw_wire_in_progress(
        &self,
        controller: &InteractionController,
        surface: &mut dyn DrawSurface,
    ) {
        let Some(wip) = controller.wire_tool.in_progress() else {
            return;
        };
        let viewport = &controller.viewport;

        surface.set_stroke(self.palette.wire_off, 2.0, StrokeStyle::Solid);
        for segment in &wip.segments {
            surface.line(
                viewport.world_to_screen(segment.start),
                viewport.world_to_screen(segment.end),
            );
        }
        if let Some(preview) = &wip.preview {
            surface.set_stroke(self.palette.grid, 2.0, StrokeStyle::Dashed);
            surface.line(
                viewport.world_to_screen(preview.start),
                viewport.world_to_screen(preview.end),
            );
        }
    }

    fn draw_points(&self, controller: &InteractionController, surface: &mut dyn DrawSurface) {
        let viewport = &controller.viewport;
        let radius = POINT_DRAW_RADIUS * viewport.scale();
        for point in controller.graph.points() {
            let color = if point.state() {
                self.palette.on
            } else {
                self.palette.off
            };
            surface.set_fill(color);
            surface.filled_circle(viewport.world_to_screen(point.position()), radius);

            surface.set_fill(self.palette.body);
            let anchor = viewport.world_to_screen(point.position());
            surface.text(Point::new(anchor.x + 8.0, anchor.y - 8.0), point.id(), 11.0);
        }
    }

    fn draw_transistors(&self, controller: &InteractionController, surface: &mut dyn DrawSurface) {
        let viewport = &controller.viewport;
        for transistor in controller.graph.transistors() {
            let body = rect_to_screen(viewport, transistor.body_rect());
            surface.set_fill(self.palette.body);
            surface.filled_rect(body);
            surface.text(
                Point::new(body.x0, body.y0 - 16.0),
                &transistor.id,
                12.0,
            );

            // Terminals keep their screen radius at any zoom, matching
            // their hit tolerance.
            for (terminal, position) in transistor.terminal_positions() {
                let color = if transistor.terminal_state(terminal) {
                    self.palette.on
                } else {
                    self.palette.off
                };
                surface.set_fill(color);
                surface.filled_circle(viewport.world_to_screen(position), TERMINAL_RADIUS);
            }
        }
    }
}

fn rect_to_screen(viewport: &Viewport, rect: Rect) -> Rect {
    let p0 = viewport.world_to_screen(Point::new(rect.x0, rect.y0));
    let p1 = viewport.world_to_screen(Point::new(rect.x1, rect.y1));
    Rect::new(p0.x, p0.y, p1.x, p1.y)
}
