//! A recording surface that captures draw calls as data.
//!
//! Used by tests to assert on painted scenes and by hosts that want to
//! serialize or replay a frame.

use crate::surface::{DrawSurface, StrokeStyle};
use kurbo::{Point, Rect};
use peniko::Color;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Color),
    SetStroke {
        color: Color,
        width: f64,
        style: StrokeStyle,
    },
    SetFill(Color),
    Line {
        from: Point,
        to: Point,
    },
    FilledCircle {
        center: Point,
        radius: f64,
    },
    FilledRect(Rect),
    Text {
        position: Point,
        text: String,
        size: f64,
    },
}

/// A [`DrawSurface`] that appends every call to a command list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Lines drawn while the given stroke style was active.
    pub fn lines_with_style(&self, style: StrokeStyle) -> Vec<(Point, Point)> {
        let mut current = StrokeStyle::Solid;
        let mut lines = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCmd::SetStroke { style, .. } => current = *style,
                DrawCmd::Line { from, to } if current == style => lines.push((*from, *to)),
                _ => {}
            }
        }
        lines
    }

    /// Circles filled with the given color.
    pub fn circles_with_fill(&self, color: Color) -> Vec<(Point, f64)> {
        let mut current = None;
        let mut circles = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCmd::SetFill(c) => current = Some(*c),
                DrawCmd::FilledCircle { center, radius } if current == Some(color) => {
                    circles.push((*center, *radius));
                }
                _ => {}
            }
        }
        circles
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCmd::Clear(color));
    }

    fn set_stroke(&mut self, color: Color, width: f64, style: StrokeStyle) {
        self.commands.push(DrawCmd::SetStroke {
            color,
            width,
            style,
        });
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCmd::SetFill(color));
    }

    fn line(&mut self, from: Point, to: Point) {
        self.commands.push(DrawCmd::Line { from, to });
    }

    fn filled_circle(&mut self, center: Point, radius: f64) {
        self.commands.push(DrawCmd::FilledCircle { center, radius });
    }

    fn filled_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::FilledRect(rect));
    }

    fn text(&mut self, position: Point, text: &str, size: f64) {
        self.commands.push(DrawCmd::Text {
            position,
            text: text.to_string(),
            size,
        });
    }
}
