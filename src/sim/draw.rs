//! Frame description emitted by the simulation
//!
//! The simulation never touches a drawing surface. Each step produces a
//! `DrawList`, an ordered list of primitive commands in viewport pixel
//! coordinates (origin top-left, y down), which the host renders.

use glam::Vec2;

/// Fill/stroke colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Hue in degrees, saturation and lightness in percent
    Hsl { h: f32, s: f32, l: f32 },
    Black,
    White,
    Red,
    DarkBlue,
}

impl Color {
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Color::Hsl { h, s, l }
    }
}

/// Scene palette
pub mod palette {
    use super::Color;

    pub const SKY: Color = Color::hsl(200.0, 70.0, 50.0);
    pub const GRASS: Color = Color::hsl(120.0, 50.0, 35.0);
    pub const WATER: Color = Color::hsl(240.0, 100.0, 58.0);
    pub const ROCK: Color = Color::hsl(0.0, 0.0, 39.0);
    pub const SNOW: Color = Color::hsl(0.0, 0.0, 100.0);
    pub const SHIP_BODY: Color = Color::hsl(0.0, 100.0, 50.0);
    pub const HINT_TEXT: Color = Color::hsl(0.0, 0.0, 75.0);
    pub const OVERLAY: Color = Color::Black;
    pub const CONTROL_PAD: Color = Color::DarkBlue;
    pub const CONTROL_ARROW: Color = Color::White;
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    FillTriangle {
        points: [Vec2; 3],
        color: Color,
    },
    /// Text centred horizontally on `position.x`, baseline at `position.y`
    Text {
        text: String,
        position: Vec2,
        size_pt: f32,
        color: Color,
    },
}

/// Ordered drawing commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    /// Vertical or diagonal stroke, 2 px wide like the canvas line width
    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width: LINE_WIDTH,
            color,
        });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillTriangle {
            points: [a, b, c],
            color,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, position: Vec2, size_pt: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            position,
            size_pt,
            color,
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over text commands only (the host lays these out separately)
    pub fn texts(&self) -> impl Iterator<Item = (&str, Vec2, f32, Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text {
                text,
                position,
                size_pt,
                color,
            } => Some((text.as_str(), *position, *size_pt, *color)),
            _ => None,
        })
    }
}

/// Stroke width for lines, in pixels
pub const LINE_WIDTH: f32 = 2.0;
