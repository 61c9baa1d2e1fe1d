//! Input state tracking for pointer and keyboard events.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are screen pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
    /// The pointer left the canvas.
    Leave,
    Scroll { position: Point, delta: Vec2 },
}

/// Keyboard event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Tracks pointer position and pressed buttons across events.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Pointer position before the most recent move.
    pub previous_pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            previous_pointer_position: Point::ZERO,
            pressed_buttons: HashSet::new(),
            modifiers: Modifiers::default(),
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                self.previous_pointer_position = *position;
                self.pointer_position = *position;
                self.pressed_buttons.insert(*button);
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = *position;
                self.pressed_buttons.remove(button);
            }
            PointerEvent::Move { position } => {
                self.previous_pointer_position = self.pointer_position;
                self.pointer_position = *position;
            }
            PointerEvent::Leave => {
                self.pressed_buttons.clear();
            }
            PointerEvent::Scroll { position, .. } => {
                self.pointer_position = *position;
            }
        }
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Pointer displacement of the most recent move, in screen pixels.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_position - self.previous_pointer_position
    }
}
