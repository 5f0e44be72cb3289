//! Vertex format shared by every tessellated shape

use bytemuck::{Pod, Zeroable};

/// Flat-coloured 2D vertex
///
/// Positions are viewport pixels out of the tessellator and clip-space
/// coordinates once the pipeline has mapped them.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same colour, moved to `(x, y)`
    pub fn moved_to(self, x: f32, y: f32) -> Self {
        Self {
            position: [x, y],
            ..self
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().attributes[1].offset, 8);
    }

    #[test]
    fn test_moved_to_keeps_color() {
        let v = Vertex::new(1.0, 2.0, [0.5; 4]).moved_to(-1.0, 1.0);
        assert_eq!(v.position, [-1.0, 1.0]);
        assert_eq!(v.color, [0.5; 4]);
    }
}
