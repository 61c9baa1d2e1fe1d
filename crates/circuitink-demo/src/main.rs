//! Headless CircuitInk demo.
//!
//! Loads a sample circuit, replays a short pointer session against it
//! (zoom, toggle, wire drawing) and paints the final frame into a
//! recording surface. Run with `RUST_LOG=debug` to watch the
//! interaction machine.

use circuitink_core::controller::{InteractionController, InteractionMode};
use circuitink_core::definition::CircuitDef;
use circuitink_core::input::{MouseButton, PointerEvent};
use circuitink_render::{Painter, RecordingSurface};
use kurbo::{Point, Size, Vec2};

const SAMPLE_CIRCUIT: &str = r#"{
    "points": [
        { "kind": "control", "id": "c1", "position": { "x": 0.0, "y": 0.0 } },
        { "kind": "control", "id": "c2", "position": { "x": 0.0, "y": 120.0 } },
        { "kind": "controlled", "id": "p1", "position": { "x": 200.0, "y": 60.0 },
          "driven_by": ["c1", "c2"] }
    ],
    "transistors": [
        { "id": "t1", "center": { "x": 420.0, "y": -80.0 }, "orientation": "down" }
    ]
}"#;

fn click(controller: &mut InteractionController, position: Point) {
    controller.handle_pointer_event(PointerEvent::Down {
        position,
        button: MouseButton::Left,
    });
    controller.handle_pointer_event(PointerEvent::Up {
        position,
        button: MouseButton::Left,
    });
}

fn screen_of(controller: &InteractionController, point_id: &str) -> Option<Point> {
    controller
        .graph
        .point(point_id)
        .map(|p| controller.viewport.world_to_screen(p.position()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("starting CircuitInk demo");

    let graph = CircuitDef::from_json(SAMPLE_CIRCUIT)?.build()?;
    let mut controller = InteractionController::new(graph);
    controller.set_viewport_size(Size::new(1024.0, 768.0));

    // Two wheel notches of zoom at the screen center.
    for _ in 0..2 {
        controller.handle_pointer_event(PointerEvent::Scroll {
            position: Point::new(512.0, 384.0),
            delta: Vec2::new(0.0, -1.0),
        });
    }

    // Toggle c1 by clicking it; p1 lights up through OR propagation.
    if let Some(position) = screen_of(&controller, "c1") {
        click(&mut controller, position);
    }
    println!(
        "after toggle: c1={} p1={}",
        controller.graph.point("c1").map(|p| p.state()).unwrap_or(false),
        controller.graph.point("p1").map(|p| p.state()).unwrap_or(false),
    );

    // Draw a wire from c2 to the gate of t1.
    controller.set_mode(InteractionMode::Draw);
    if let Some(start) = screen_of(&controller, "c2") {
        click(&mut controller, start);
    }
    if let Some(transistor) = controller.graph.transistor("t1") {
        let gate = transistor.terminal_position(circuitink_core::Terminal::Gate);
        let target = controller.viewport.world_to_screen(gate);
        controller.handle_pointer_event(PointerEvent::Move { position: target });
        click(&mut controller, target);
    }
    controller.set_mode(InteractionMode::Pan);

    for wire in controller.graph.wires() {
        println!(
            "wire {} ({} -> {}): {} segments, state={}",
            wire.id,
            wire.source_point_id,
            wire.target_point_id,
            wire.segments.len(),
            wire.state,
        );
    }

    // One coalesced redraw for the whole session.
    if controller.redraw.take() {
        let painter = Painter::new();
        let mut frame = RecordingSurface::new();
        painter.draw(&controller, Some(&mut frame));
        println!("painted {} draw commands", frame.commands.len());
    }

    Ok(())
}
