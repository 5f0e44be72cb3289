//! Shape tessellation for draw commands
//!
//! Every filled primitive becomes a triangle list in viewport pixel
//! coordinates. Text is skipped here; the host lays it out in the DOM.

use glam::Vec2;
use std::f32::consts::PI;

use super::color::to_rgba;
use super::vertex::Vertex;
use crate::sim::{DrawCommand, DrawList};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Segment count that keeps circle edges smooth at the given radius
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 0.5) as u32).clamp(12, 64)
}

/// Two triangles covering an axis-aligned rectangle
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// A stroke as a quad `width` pixels across; empty for zero-length lines
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

pub fn triangle(points: [Vec2; 3], color: [f32; 4]) -> [Vertex; 3] {
    points.map(|p| Vertex::new(p.x, p.y, color))
}

/// Tessellate a whole frame, preserving draw order
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(list.len() * 6);

    for cmd in &list.commands {
        match cmd {
            DrawCommand::FillRect {
                origin,
                size,
                color,
            } => vertices.extend(rect(*origin, *size, to_rgba(*color))),
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => vertices.extend(line(*from, *to, *width, to_rgba(*color))),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                if *radius > 0.0 {
                    vertices.extend(circle(
                        *center,
                        *radius,
                        to_rgba(*color),
                        circle_segments(*radius),
                    ));
                }
            }
            DrawCommand::FillTriangle { points, color } => {
                vertices.extend(triangle(*points, to_rgba(*color)))
            }
            DrawCommand::Text { .. } => {}
        }
    }

    vertices
}
