use std::f32::consts::PI;

use glam::Vec2;

use super::spherical::CameraPose;
use crate::options::OrbitOptions;

/// Inclusive radius limits for wheel zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBand {
    /// Closest allowed radius.
    pub min: f32,
    /// Farthest allowed radius.
    pub max: f32,
}

/// Maps pointer drags and wheel deltas onto a [`CameraPose`].
///
/// Tracks whether the pointer is dragging the camera and where it was
/// last; the pose itself is owned by the view controller, which decides
/// whether direct control is currently allowed.
#[derive(Debug, Clone)]
pub struct OrbitController {
    options: OrbitOptions,
    dragging: bool,
    last_pointer: Vec2,
}

impl OrbitController {
    /// Controller with the given sensitivities and limits.
    #[must_use]
    pub fn new(options: OrbitOptions) -> Self {
        Self {
            options,
            dragging: false,
            last_pointer: Vec2::ZERO,
        }
    }

    /// Replace sensitivities and limits.
    pub fn set_options(&mut self, options: OrbitOptions) {
        self.options = options;
    }

    /// Whether the pointer is held down on the scene.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer pressed at `pos` (pixels).
    pub fn begin_drag(&mut self, pos: Vec2) {
        self.dragging = true;
        self.last_pointer = pos;
    }

    /// Pointer moved to `pos`. Returns the pixel delta since the previous
    /// position while a drag is in progress.
    pub fn drag_to(&mut self, pos: Vec2) -> Option<Vec2> {
        if !self.dragging {
            self.last_pointer = pos;
            return None;
        }
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        Some(delta)
    }

    /// Pointer released. Returns whether a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }

    /// Rotate `pose` by a pixel delta: horizontal motion turns the azimuth,
    /// vertical motion tilts the polar angle (kept away from the poles).
    pub fn rotate(&self, pose: &mut CameraPose, delta: Vec2) {
        let margin = self.options.polar_margin;
        pose.spherical.azimuth -= delta.x * self.options.rotate_speed;
        pose.spherical.polar = (pose.spherical.polar
            - delta.y * self.options.rotate_speed)
            .clamp(margin, PI - margin);
    }

    /// Change the orbit radius by a wheel delta, clamped to `band`.
    pub fn zoom(&self, pose: &mut CameraPose, delta: f32, band: ZoomBand) {
        pose.spherical.radius = (pose.spherical.radius
            + delta * self.options.zoom_speed)
            .clamp(band.min, band.max);
    }

    /// Zoom limits in sphere mode.
    #[must_use]
    pub fn sphere_band(&self) -> ZoomBand {
        ZoomBand {
            min: self.options.sphere_min_radius,
            max: self.options.sphere_max_radius,
        }
    }

    /// Zoom limits in grid mode, relative to the grid camera radius.
    #[must_use]
    pub fn grid_band(&self, grid_radius: f32) -> ZoomBand {
        ZoomBand {
            min: grid_radius * self.options.grid_min_factor,
            max: grid_radius * self.options.grid_max_factor,
        }
    }
}
