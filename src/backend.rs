//! Seam between the visualizer and whatever draws its points.
//!
//! [`GpuRenderer`](crate::GpuRenderer) is the wgpu implementation. Tests use
//! recording backends to check that every field allocation is released once.

use glam::{Mat4, Vec3};

use crate::field::ParticleField;

/// Something that can hold particle buffers and draw a frame.
pub trait RenderBackend {
    /// Owned reference to one field's GPU buffer.
    type FieldHandle;
    /// Per-frame rendering failure.
    type Error;

    /// Current drawable size in physical pixels.
    fn viewport(&self) -> (u32, u32);

    /// Allocate a buffer for `field` and upload its initial positions.
    fn create_field(&mut self, field: &ParticleField) -> Self::FieldHandle;

    /// Re-upload positions after they changed.
    fn upload_positions(&mut self, handle: &Self::FieldHandle, positions: &[Vec3]);

    /// Free a buffer. Called exactly once per handle.
    fn release_field(&mut self, handle: Self::FieldHandle);

    /// Resize the drawable surface. Never called with a zero dimension.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame.
    fn render(&mut self, frame: &Frame<'_, Self::FieldHandle>) -> Result<(), Self::Error>;

    /// Release the graphics context. All field handles are released first.
    fn dispose(self)
    where
        Self: Sized;
}

/// Everything needed to draw one frame.
pub struct Frame<'a, H> {
    /// Projection * view * scene rotation.
    pub view_proj: Mat4,
    /// Viewport width over height.
    pub aspect: f32,
    /// The live particle field, if any.
    pub points: Option<PointsDraw<'a, H>>,
}

/// Draw parameters for one particle field.
pub struct PointsDraw<'a, H> {
    pub handle: &'a H,
    pub count: u32,
    pub point_size: f32,
    pub color: Vec3,
    pub opacity: f32,
}
