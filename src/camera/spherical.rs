use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;

use crate::animation::interpolation::{lerp_f32, lerp_vec3};

/// Spherical coordinates of a point relative to a center.
///
/// `polar` is measured from the +Y axis, `azimuth` around +Y starting at
/// +Z, so `(r, pi/2, 0)` sits on the +Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the center.
    pub radius: f32,
    /// Angle from +Y, in radians.
    pub polar: f32,
    /// Angle around +Y from +Z, in radians.
    pub azimuth: f32,
}

impl Spherical {
    /// Spherical coordinates from components.
    #[must_use]
    pub const fn new(radius: f32, polar: f32, azimuth: f32) -> Self {
        Self {
            radius,
            polar,
            azimuth,
        }
    }

    /// Point on the equator in front of the center at `radius`.
    #[must_use]
    pub const fn front(radius: f32) -> Self {
        Self::new(radius, FRAC_PI_2, 0.0)
    }

    /// Cartesian offset from the center.
    #[must_use]
    pub fn to_offset(self) -> Vec3 {
        let ring = self.polar.sin() * self.radius;
        Vec3::new(
            ring * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            ring * self.azimuth.cos(),
        )
    }

    /// Spherical coordinates of a cartesian offset.
    ///
    /// Returns `None` when the offset has no usable direction (zero length
    /// or non-finite components).
    #[must_use]
    pub fn from_offset(offset: Vec3) -> Option<Self> {
        let radius = offset.length();
        if !radius.is_finite() || radius <= f32::EPSILON {
            return None;
        }
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);
        let s = Self::new(radius, polar, azimuth);
        s.is_finite().then_some(s)
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.radius.is_finite() && self.polar.is_finite() && self.azimuth.is_finite()
    }

    /// Same direction, with the azimuth shifted by whole turns to lie
    /// within half a turn of `reference`, so that interpolating from
    /// `reference` takes the short way around.
    #[must_use]
    pub fn with_azimuth_near(self, reference: f32) -> Self {
        let turns = ((reference - self.azimuth) / TAU).round();
        Self {
            azimuth: self.azimuth + turns * TAU,
            ..self
        }
    }

    /// Component-wise interpolation.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            radius: lerp_f32(t, self.radius, other.radius),
            polar: lerp_f32(t, self.polar, other.polar),
            azimuth: lerp_f32(t, self.azimuth, other.azimuth),
        }
    }
}

/// Camera placement: spherical coordinates around a look-at target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera offset from the target.
    pub spherical: Spherical,
    /// Look-at point.
    pub target: Vec3,
}

impl CameraPose {
    /// Canonical pose: on the +Z axis at `radius`, looking at the origin.
    #[must_use]
    pub const fn canonical(radius: f32) -> Self {
        Self {
            spherical: Spherical::front(radius),
            target: Vec3::ZERO,
        }
    }

    /// World-space camera position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.target + self.spherical.to_offset()
    }

    /// Interpolate spherical coordinates component-wise and the target
    /// linearly.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            spherical: self.spherical.lerp(other.spherical, t),
            target: lerp_vec3(t, self.target, other.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    #[test]
    fn front_is_on_positive_z() {
        let p = Spherical::front(15.0).to_offset();
        assert!((p - Vec3::new(0.0, 0.0, 15.0)).length() < 1e-5);
    }

    #[test]
    fn offset_round_trip() {
        let s = Spherical::new(4.0, 1.1, -0.7);
        let back = Spherical::from_offset(s.to_offset()).unwrap();
        assert!((back.radius - 4.0).abs() < 1e-5);
        assert!((back.polar - 1.1).abs() < 1e-5);
        assert!((back.azimuth + 0.7).abs() < 1e-5);
    }

    #[test]
    fn zero_offset_has_no_direction() {
        assert!(Spherical::from_offset(Vec3::ZERO).is_none());
        assert!(Spherical::from_offset(Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
    }

    #[test]
    fn straight_up_has_zero_polar() {
        let s = Spherical::from_offset(Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert_eq!(s.polar, 0.0);
        assert_eq!(s.radius, 3.0);
    }

    #[test]
    fn azimuth_unwraps_toward_reference() {
        let s = Spherical::new(1.0, 1.0, 0.0).with_azimuth_near(3.0 * TAU + 0.2);
        assert!((s.azimuth - 3.0 * TAU).abs() < 1e-4);
        let s = Spherical::new(1.0, 1.0, 0.5).with_azimuth_near(0.4);
        assert_eq!(s.azimuth, 0.5);
        let s = Spherical::new(1.0, 1.0, PI - 0.1).with_azimuth_near(-PI + 0.1);
        assert!((s.azimuth - (-PI - 0.1)).abs() < 1e-4);
    }

    #[test]
    fn pose_eye_is_offset_from_target() {
        let pose = CameraPose {
            spherical: Spherical::new(2.0, PI / 2.0, PI / 2.0),
            target: Vec3::new(1.0, 1.0, 1.0),
        };
        assert!((pose.eye() - Vec3::new(3.0, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn pose_lerp_endpoints() {
        let a = CameraPose::canonical(15.0);
        let b = CameraPose {
            spherical: Spherical::new(3.5, 0.5, 1.0),
            target: Vec3::new(1.0, 2.0, 3.0),
        };
        assert_eq!(a.lerp(&b, 0.0), a);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.spherical.radius - 9.25).abs() < 1e-5);
        assert!((mid.target - Vec3::new(0.5, 1.0, 1.5)).length() < 1e-5);
    }
}
