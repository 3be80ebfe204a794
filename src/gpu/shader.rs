use bytemuck::{Pod, Zeroable};

pub const POINTS_SHADER: &str = include_str!("points.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    /// RGB plus opacity.
    pub color: [f32; 4],
    pub point_size: f32,
    pub aspect: f32,
    pub _padding: [f32; 2],
}
