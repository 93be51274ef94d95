//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// Convert an 8-bit RGB color plus alpha to a vertex color
pub fn rgb8(rgb: [u8; 3], alpha: u8) -> [f32; 4] {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        alpha as f32 / 255.0,
    ]
}

/// Colors for scene elements
pub mod colors {
    pub const GRASS: [f32; 4] = [0.66, 0.66, 0.66, 1.0];
    pub const ROAD: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const ROAD_EDGE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LANE_DASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CAR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const CAR_OUTLINE: [f32; 4] = [0.0, 0.0, 0.59, 1.0];
    pub const CAR_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    pub const SIGN_FACE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SIGN_RIM: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const SIGN_INK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const WARNING_FLASH: [f32; 4] = [1.0, 0.0, 0.0, 0.18];
    pub const HORN_FLASH: [f32; 4] = [1.0, 0.85, 0.0, 0.12];
}
