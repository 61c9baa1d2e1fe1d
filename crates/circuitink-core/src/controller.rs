//! The pointer interaction state machine.
//!
//! Composes the viewport, the circuit graph and the wire tool, and
//! routes raw pointer/wheel/keyboard events into state mutations. All
//! session state is owned here; there are no process-wide singletons.

use crate::graph::CircuitGraph;
use crate::hit::{HitTarget, POINT_HIT_RADIUS, find_nearest};
use crate::input::{InputState, KeyEvent, MouseButton, PointerEvent};
use crate::redraw::RedrawScheduler;
use crate::routing::WireTool;
use crate::transistor::TERMINAL_RADIUS;
use crate::viewport::Viewport;
use kurbo::{Point, Size};

/// What the primary pointer button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Drag pans the canvas; clicking a control point toggles it.
    #[default]
    Pan,
    /// Presses drive the interactive wire tool.
    Draw,
}

/// Owns one canvas session and consumes its input events.
///
/// Every mutation requests a redraw; the host drains
/// [`InteractionController::redraw`] once per tick.
#[derive(Debug, Clone)]
pub struct InteractionController {
    pub viewport: Viewport,
    pub graph: CircuitGraph,
    pub wire_tool: WireTool,
    pub input: InputState,
    pub redraw: RedrawScheduler,
    mode: InteractionMode,
    /// A pan drag is in progress.
    panning: bool,
}

impl InteractionController {
    /// Create a session around a loaded circuit graph.
    pub fn new(graph: CircuitGraph) -> Self {
        Self {
            viewport: Viewport::new(),
            graph,
            wire_tool: WireTool::new(),
            input: InputState::new(),
            redraw: RedrawScheduler::new(),
            mode: InteractionMode::default(),
            panning: false,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Switch between pan and draw mode. Leaving draw mode discards any
    /// wire in progress.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }
        if self.mode == InteractionMode::Draw {
            self.wire_tool.cancel();
        }
        self.panning = false;
        self.mode = mode;
        log::debug!("interaction mode set to {mode:?}");
        self.redraw.request();
    }

    /// Flip between pan and draw mode.
    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            InteractionMode::Pan => InteractionMode::Draw,
            InteractionMode::Draw => InteractionMode::Pan,
        };
        self.set_mode(next);
    }

    /// Forward new canvas pixel dimensions from the host.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport.set_viewport_size(size);
        self.redraw.request();
    }

    /// Route a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.input.handle_pointer_event(&event);
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.on_press(position),
            PointerEvent::Down { .. } => {}
            PointerEvent::Move { position } => self.on_move(position),
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => self.panning = false,
            PointerEvent::Up { .. } => {}
            PointerEvent::Leave => self.panning = false,
            PointerEvent::Scroll { position, delta } => self.on_scroll(position, delta.y),
        }
    }

    /// Route a keyboard event. Escape cancels a wire in progress.
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        if let KeyEvent::Pressed(key) = event {
            if key == "Escape" && self.wire_tool.is_drawing() {
                self.wire_tool.cancel();
                self.redraw.request();
            }
        }
    }

    /// Resolve a screen position to the nearest interactive element.
    ///
    /// Points are tested in world space with [`POINT_HIT_RADIUS`] (so
    /// the effective screen tolerance scales with zoom); transistor
    /// terminals are tested in screen space with the fixed
    /// [`TERMINAL_RADIUS`].
    pub fn hit_target(&self, screen: Point) -> Option<HitTarget> {
        let world = self.viewport.screen_to_world(screen);
        let point_hit = find_nearest(
            world,
            self.graph
                .points()
                .iter()
                .map(|p| (p.id().to_string(), p.position())),
            POINT_HIT_RADIUS,
        );
        if let Some(id) = point_hit {
            return Some(HitTarget::Point(id));
        }

        let terminals: Vec<(HitTarget, Point)> = self
            .graph
            .transistors()
            .iter()
            .flat_map(|t| {
                t.terminal_positions().into_iter().map(move |(terminal, pos)| {
                    (
                        HitTarget::Terminal {
                            transistor: t.id.clone(),
                            terminal,
                        },
                        self.viewport.world_to_screen(pos),
                    )
                })
            })
            .collect();
        find_nearest(screen, terminals, TERMINAL_RADIUS)
    }

    /// World position of a hit target.
    pub fn target_position(&self, target: &HitTarget) -> Option<Point> {
        match target {
            HitTarget::Point(id) => self.graph.point(id).map(|p| p.position()),
            HitTarget::Terminal {
                transistor,
                terminal,
            } => self
                .graph
                .transistor(transistor)
                .map(|t| t.terminal_position(*terminal)),
        }
    }

    fn on_press(&mut self, position: Point) {
        match self.mode {
            InteractionMode::Pan => self.on_pan_press(position),
            InteractionMode::Draw => self.on_draw_press(position),
        }
    }

    fn on_pan_press(&mut self, position: Point) {
        if let Some(HitTarget::Point(id)) = self.hit_target(position) {
            let is_control = self.graph.point(&id).is_some_and(|p| p.is_control());
            if is_control {
                match self.graph.toggle(&id) {
                    Ok(_) => self.redraw.request(),
                    Err(err) => log::error!("toggle of `{id}` failed: {err}"),
                }
                return;
            }
        }
        // Anything else starts a pan; a click that hits no element is a
        // normal no-op.
        self.panning = true;
    }

    fn on_draw_press(&mut self, position: Point) {
        let target = self.hit_target(position);
        if !self.wire_tool.is_drawing() {
            let Some(target) = target else {
                log::debug!("draw press hit nothing; no wire started");
                return;
            };
            let Some(anchor) = self.target_position(&target) else {
                return;
            };
            self.wire_tool.begin(target.wire_endpoint_id(), anchor);
            self.redraw.request();
            return;
        }

        let source_id = self
            .wire_tool
            .in_progress()
            .map(|wip| wip.source_id.clone());
        match target {
            Some(target) if Some(target.wire_endpoint_id()) != source_id => {
                let Some(end) = self.target_position(&target) else {
                    return;
                };
                if let Some(wire) = self.wire_tool.finish(target.wire_endpoint_id(), end) {
                    self.graph.add_wire(wire);
                }
                self.redraw.request();
            }
            _ => {
                // Empty canvas (or the source itself): confirm the
                // previewed segment as a bend.
                self.wire_tool.confirm_bend();
                self.redraw.request();
            }
        }
    }

    fn on_move(&mut self, position: Point) {
        if self.wire_tool.is_drawing() {
            let world = self.viewport.screen_to_world(position);
            self.wire_tool.update_preview(world);
            self.redraw.request();
        } else if self.panning && self.input.is_button_pressed(MouseButton::Left) {
            self.viewport.pan(self.input.pointer_delta());
            self.redraw.request();
        }
    }

    fn on_scroll(&mut self, position: Point, delta_y: f64) {
        if delta_y == 0.0 {
            return;
        }
        // Scrolling up zooms in, mirroring wheel deltaY semantics.
        self.viewport.zoom_step(position, delta_y < 0.0);
        self.redraw.request();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CircuitPoint;
    use crate::transistor::{Orientation, Terminal, Transistor};
    use kurbo::Vec2;

    fn sample_graph() -> CircuitGraph {
        CircuitGraph::new(
            vec![
                CircuitPoint::Control {
                    id: "c1".to_string(),
                    position: Point::new(0.0, 0.0),
                    state: false,
                },
                CircuitPoint::Controlled {
                    id: "p1".to_string(),
                    position: Point::new(100.0, 80.0),
                    state: false,
                    driven_by: vec!["c1".to_string()],
                },
            ],
            vec![Transistor::new(
                "t1",
                Point::new(200.0, 200.0),
                Orientation::Up,
            )],
        )
        .unwrap()
    }

    fn press(controller: &mut InteractionController, x: f64, y: f64) {
        controller.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
        controller.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    #[test]
    fn test_click_toggles_control_point() {
        let mut controller = InteractionController::new(sample_graph());
        // c1 at world (0,0) maps to screen (400,300) by default.
        press(&mut controller, 405.0, 297.0);

        assert!(controller.graph.point("c1").unwrap().state());
        assert!(controller.graph.point("p1").unwrap().state());
        assert!(controller.redraw.take());
    }

    #[test]
    fn test_click_on_controlled_point_does_not_toggle() {
        let mut controller = InteractionController::new(sample_graph());
        // p1 at world (100,80) maps to screen (500,380).
        press(&mut controller, 500.0, 380.0);
        assert!(!controller.graph.point("p1").unwrap().state());
    }

    #[test]
    fn test_empty_click_is_noop_for_graph() {
        let mut controller = InteractionController::new(sample_graph());
        press(&mut controller, 50.0, 50.0);
        assert!(!controller.graph.point("c1").unwrap().state());
        assert_eq!(controller.graph.wires().len(), 1);
    }

    #[test]
    fn test_drag_pans_viewport() {
        let mut controller = InteractionController::new(sample_graph());
        controller.handle_pointer_event(PointerEvent::Down {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Left,
        });
        controller.handle_pointer_event(PointerEvent::Move {
            position: Point::new(80.0, 40.0),
        });

        assert!((controller.viewport.offset.x + 30.0).abs() < f64::EPSILON);
        assert!((controller.viewport.offset.y - 10.0).abs() < f64::EPSILON);

        // Release ends the pan; further moves do nothing.
        controller.handle_pointer_event(PointerEvent::Up {
            position: Point::new(80.0, 40.0),
            button: MouseButton::Left,
        });
        controller.handle_pointer_event(PointerEvent::Move {
            position: Point::new(200.0, 200.0),
        });
        assert!((controller.viewport.offset.x + 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leave_ends_pan() {
        let mut controller = InteractionController::new(sample_graph());
        controller.handle_pointer_event(PointerEvent::Down {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Left,
        });
        controller.handle_pointer_event(PointerEvent::Leave);
        controller.handle_pointer_event(PointerEvent::Move {
            position: Point::new(90.0, 90.0),
        });
        assert!((controller.viewport.offset.x).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_zooms_at_cursor() {
        let mut controller = InteractionController::new(sample_graph());
        let cursor = Point::new(400.0, 300.0);
        let before = controller.viewport.screen_to_world(cursor);

        controller.handle_pointer_event(PointerEvent::Scroll {
            position: cursor,
            delta: Vec2::new(0.0, -1.0),
        });

        assert!((controller.viewport.scale() - 1.07).abs() < f64::EPSILON);
        let after = controller.viewport.screen_to_world(cursor);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_hit_radius_is_screen_space() {
        let mut controller = InteractionController::new(sample_graph());
        // Gate of t1 (Up) sits at world (200,180).
        let gate_screen = controller.viewport.world_to_screen(Point::new(200.0, 180.0));
        let hit = controller.hit_target(Point::new(gate_screen.x + 6.0, gate_screen.y));
        assert_eq!(
            hit,
            Some(HitTarget::Terminal {
                transistor: "t1".to_string(),
                terminal: Terminal::Gate,
            })
        );

        // Zoomed far out, 6 screen pixels is a large world distance but
        // the terminal tolerance stays 9 screen pixels.
        for _ in 0..30 {
            controller.viewport.zoom_step(Point::new(400.0, 300.0), false);
        }
        let gate_screen = controller.viewport.world_to_screen(Point::new(200.0, 180.0));
        let hit = controller.hit_target(Point::new(gate_screen.x + 6.0, gate_screen.y));
        assert!(matches!(hit, Some(HitTarget::Terminal { .. })));
    }

    #[test]
    fn test_draw_wire_between_points() {
        let mut controller = InteractionController::new(sample_graph());
        controller.set_mode(InteractionMode::Draw);

        // Anchor at c1 (screen 400,300).
        press(&mut controller, 400.0, 300.0);
        assert!(controller.wire_tool.is_drawing());

        // Preview toward the right, confirm a bend on empty canvas.
        controller.handle_pointer_event(PointerEvent::Move {
            position: Point::new(460.0, 302.0),
        });
        press(&mut controller, 460.0, 302.0);
        assert!(!controller.wire_tool.in_progress().unwrap().segments.is_empty());

        // Finish on p1 (screen 500,380): endpoint is exact.
        press(&mut controller, 500.0, 380.0);
        assert!(!controller.wire_tool.is_drawing());

        let wire = controller.graph.wires().last().unwrap();
        assert_eq!(wire.source_point_id, "c1");
        assert_eq!(wire.target_point_id, "p1");
        assert_eq!(wire.end(), Some(Point::new(100.0, 80.0)));
        assert!(wire.is_connected());
    }

    #[test]
    fn test_completed_wire_mirrors_toggles() {
        let mut controller = InteractionController::new(sample_graph());
        controller.set_mode(InteractionMode::Draw);
        press(&mut controller, 400.0, 300.0);
        press(&mut controller, 500.0, 380.0);

        controller.set_mode(InteractionMode::Pan);
        press(&mut controller, 400.0, 300.0);

        let wire = controller.graph.wires().last().unwrap();
        assert_eq!(wire.source_point_id, "c1");
        assert!(wire.state);
    }

    #[test]
    fn test_draw_press_on_empty_canvas_starts_nothing() {
        let mut controller = InteractionController::new(sample_graph());
        controller.set_mode(InteractionMode::Draw);
        press(&mut controller, 50.0, 50.0);
        assert!(!controller.wire_tool.is_drawing());
    }

    #[test]
    fn test_escape_cancels_wire() {
        let mut controller = InteractionController::new(sample_graph());
        controller.set_mode(InteractionMode::Draw);
        press(&mut controller, 400.0, 300.0);
        assert!(controller.wire_tool.is_drawing());

        controller.handle_key_event(KeyEvent::Pressed("Escape".to_string()));
        assert!(!controller.wire_tool.is_drawing());
        let wire_count = controller.graph.wires().len();
        assert_eq!(wire_count, 1); // only the auto-derived wire
    }

    #[test]
    fn test_mode_switch_cancels_wire() {
        let mut controller = InteractionController::new(sample_graph());
        controller.set_mode(InteractionMode::Draw);
        press(&mut controller, 400.0, 300.0);

        controller.set_mode(InteractionMode::Pan);
        assert!(!controller.wire_tool.is_drawing());
        assert_eq!(controller.mode(), InteractionMode::Pan);
    }

    #[test]
    fn test_mutations_coalesce_into_one_redraw() {
        let mut controller = InteractionController::new(sample_graph());
        controller.redraw.take();

        controller.handle_pointer_event(PointerEvent::Scroll {
            position: Point::new(100.0, 100.0),
            delta: Vec2::new(0.0, -1.0),
        });
        press(&mut controller, 405.0, 297.0);

        assert!(controller.redraw.take());
        assert!(!controller.redraw.take());
    }
}
