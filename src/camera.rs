//! Fixed perspective camera looking down -Z at the scene origin.

use glam::{Mat4, Vec3};

/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;
/// Distance from the origin along +Z.
pub const CAMERA_Z: f32 = 5.0;

/// Perspective camera rig. Only the aspect ratio changes after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    aspect: f32,
}

impl CameraRig {
    /// Create a camera for a viewport of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        let mut rig = Self { aspect: 1.0 };
        rig.set_viewport(width, height);
        rig
    }

    /// Recompute the aspect ratio. Degenerate sizes keep the previous ratio.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// World position of the camera.
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, CAMERA_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Combined projection, view, and scene rotation about Y.
    pub fn view_proj(&self, scene_rotation: f32) -> Mat4 {
        self.projection_matrix() * self.view_matrix() * Mat4::from_rotation_y(scene_rotation)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self { aspect: 1.0 }
    }
}
