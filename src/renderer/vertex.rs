//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.01, 0.01, 0.04, 1.0];
    /// Play area fill, visible against the letterbox bars
    pub const PLAY_AREA: [f32; 4] = [0.03, 0.03, 0.08, 1.0];
    pub const STAR: [f32; 4] = [0.8, 0.85, 1.0, 0.6];
    pub const SHIP_HULL: [f32; 4] = [0.3, 0.75, 1.0, 1.0];
    pub const SHIP_COCKPIT: [f32; 4] = [0.9, 0.95, 1.0, 1.0];
    pub const SHIP_FLAME: [f32; 4] = [1.0, 0.55, 0.1, 0.9];
    pub const ALIEN_BODY: [f32; 4] = [0.35, 0.9, 0.3, 1.0];
    pub const ALIEN_EYE: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.0, 1.0]; // Yellow
    pub const LOSS_LINE: [f32; 4] = [1.0, 0.2, 0.2, 0.35];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 24);
        assert_eq!(desc.attributes[1].offset, 8);
    }
}
