//! Interpolation helpers shared by camera and card tweens.

use glam::{Quat, Vec3};

/// Linear interpolation between two scalars.
#[inline]
#[must_use]
pub fn lerp_f32(t: f32, start: f32, end: f32) -> f32 {
    start + (end - start) * t
}

/// Linear interpolation between two positions.
#[inline]
#[must_use]
pub fn lerp_vec3(t: f32, start: Vec3, end: Vec3) -> Vec3 {
    start + (end - start) * t
}

/// Spherical interpolation between two orientations.
#[inline]
#[must_use]
pub fn slerp_quat(t: f32, start: Quat, end: Quat) -> Quat {
    start.slerp(end, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp_f32(0.0, 2.0, 6.0), 2.0);
        assert_eq!(lerp_f32(1.0, 2.0, 6.0), 6.0);
        assert_eq!(lerp_f32(0.25, 2.0, 6.0), 3.0);
        let v = lerp_vec3(0.5, Vec3::ZERO, Vec3::new(2.0, 4.0, -6.0));
        assert_eq!(v, Vec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn slerp_reaches_identity() {
        let start = Quat::from_rotation_y(1.2);
        let end = slerp_quat(1.0, start, Quat::IDENTITY);
        assert!(end.angle_between(Quat::IDENTITY) < 1e-4);
        let mid = slerp_quat(0.5, start, Quat::IDENTITY);
        assert!((mid.angle_between(Quat::IDENTITY) - 0.6).abs() < 1e-3);
    }
}
