//! Transistor elements and their terminal geometry.
//!
//! Transistors are data-only in the current model: the three terminal
//! booleans are independent and no conduction rule links the gate to
//! source/drain.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Body width along the terminal row, in world units.
pub const BODY_WIDTH: f64 = 120.0;
/// Body height across the terminal row, in world units.
pub const BODY_HEIGHT: f64 = 40.0;
/// Hit and draw radius for terminals, in screen pixels (unscaled).
pub const TERMINAL_RADIUS: f64 = 9.0;

/// Which way the gate faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Up,
    Down,
    Left,
    Right,
}

/// A named connection site on a transistor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Source,
    Drain,
    Gate,
}

impl Terminal {
    /// Short name used in labels and composite terminal ids.
    pub fn name(self) -> &'static str {
        match self {
            Terminal::Source => "source",
            Terminal::Drain => "drain",
            Terminal::Gate => "gate",
        }
    }

    /// Inverse of [`Terminal::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "source" => Some(Terminal::Source),
            "drain" => Some(Terminal::Drain),
            "gate" => Some(Terminal::Gate),
            _ => None,
        }
    }
}

/// A transistor-like element with three terminals at fixed offsets from
/// its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transistor {
    pub id: String,
    pub center: Point,
    pub orientation: Orientation,
    #[serde(default)]
    pub source: bool,
    #[serde(default)]
    pub drain: bool,
    #[serde(default)]
    pub gate: bool,
}

impl Transistor {
    /// Create a transistor with all terminals low.
    pub fn new(id: impl Into<String>, center: Point, orientation: Orientation) -> Self {
        Self {
            id: id.into(),
            center,
            orientation,
            source: false,
            drain: false,
            gate: false,
        }
    }

    /// World position of a terminal.
    ///
    /// The offsets are a static geometric function of the orientation;
    /// source and drain sit on the long side, the gate on the short
    /// side facing the orientation.
    pub fn terminal_position(&self, terminal: Terminal) -> Point {
        let half_w = BODY_WIDTH / 2.0;
        let half_h = BODY_HEIGHT / 2.0;
        let offset = match self.orientation {
            Orientation::Down => match terminal {
                Terminal::Source => Vec2::new(-half_w, 0.0),
                Terminal::Drain => Vec2::new(half_w, 0.0),
                Terminal::Gate => Vec2::new(0.0, half_h),
            },
            Orientation::Up => match terminal {
                Terminal::Source => Vec2::new(half_w, 0.0),
                Terminal::Drain => Vec2::new(-half_w, 0.0),
                Terminal::Gate => Vec2::new(0.0, -half_h),
            },
            Orientation::Left => match terminal {
                Terminal::Source => Vec2::new(0.0, half_w),
                Terminal::Drain => Vec2::new(0.0, -half_w),
                Terminal::Gate => Vec2::new(-half_h, 0.0),
            },
            Orientation::Right => match terminal {
                Terminal::Source => Vec2::new(0.0, -half_w),
                Terminal::Drain => Vec2::new(0.0, half_w),
                Terminal::Gate => Vec2::new(half_h, 0.0),
            },
        };
        self.center + offset
    }

    /// All three terminals with their world positions.
    pub fn terminal_positions(&self) -> [(Terminal, Point); 3] {
        [
            (Terminal::Source, self.terminal_position(Terminal::Source)),
            (Terminal::Drain, self.terminal_position(Terminal::Drain)),
            (Terminal::Gate, self.terminal_position(Terminal::Gate)),
        ]
    }

    /// Current boolean state of a terminal.
    pub fn terminal_state(&self, terminal: Terminal) -> bool {
        match terminal {
            Terminal::Source => self.source,
            Terminal::Drain => self.drain,
            Terminal::Gate => self.gate,
        }
    }

    /// Body rectangle in world coordinates.
    ///
    /// The body is wide for Up/Down orientations and transposed for
    /// Left/Right.
    pub fn body_rect(&self) -> Rect {
        let (half_w, half_h) = match self.orientation {
            Orientation::Up | Orientation::Down => (BODY_WIDTH / 2.0, BODY_HEIGHT / 2.0),
            Orientation::Left | Orientation::Right => (BODY_HEIGHT / 2.0, BODY_WIDTH / 2.0),
        };
        Rect::new(
            self.center.x - half_w,
            self.center.y - half_h,
            self.center.x + half_w,
            self.center.y + half_h,
        )
    }
}
