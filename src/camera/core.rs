use glam::{Mat4, Vec3};
use serde::Serialize;

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

/// Per-frame camera data handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraSnapshot {
    /// View matrix (column-major).
    pub view: [[f32; 4]; 4],
    /// Projection matrix (column-major).
    pub projection: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Camera forward direction.
    pub forward: [f32; 3],
}

impl Camera {
    /// Camera at `eye` looking at `target`, projection from options.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32, eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix ([0,1] depth range).
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Update the aspect ratio after a viewport resize. Zero-sized
    /// viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Renderer-facing snapshot of the current camera state.
    #[must_use]
    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            view: self.build_view().to_cols_array_2d(),
            projection: self.build_projection().to_cols_array_2d(),
            position: self.eye.to_array(),
            forward: (self.target - self.eye).normalize_or_zero().to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(
            &CameraOptions::default(),
            1.5,
            Vec3::new(0.0, 0.0, 15.0),
            Vec3::ZERO,
        )
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera();
        let clip = cam.build_matrix() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn resize_ignores_empty_viewport() {
        let mut cam = camera();
        cam.resize(0, 600);
        assert_eq!(cam.aspect, 1.5);
        cam.resize(800, 400);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn snapshot_forward_points_at_target() {
        let snap = camera().snapshot();
        assert_eq!(snap.forward, [0.0, 0.0, -1.0]);
        assert_eq!(snap.position, [0.0, 0.0, 15.0]);
    }
}
