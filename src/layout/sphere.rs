use std::f32::consts::PI;

use glam::Vec3;

/// Position of card `index` out of `count` on a sphere of `radius`.
///
/// Uses the Fibonacci lattice: `polar = acos(-1 + (2i + 1) / n)` and
/// `azimuth = sqrt(n * pi) * polar`. Returns the origin when `count` is
/// zero.
#[must_use]
pub fn sphere_position(index: usize, count: usize, radius: f32) -> Vec3 {
    if count == 0 {
        return Vec3::ZERO;
    }
    let n = count as f32;
    let polar = (-1.0 + (2.0 * index as f32 + 1.0) / n).clamp(-1.0, 1.0).acos();
    let azimuth = (n * PI).sqrt() * polar;
    Vec3::new(
        radius * azimuth.cos() * polar.sin(),
        radius * azimuth.sin() * polar.sin(),
        radius * polar.cos(),
    )
}

/// All sphere positions for `count` cards.
#[must_use]
pub fn sphere_positions(count: usize, radius: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| sphere_position(i, count, radius))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_lie_on_the_sphere() {
        for p in sphere_positions(37, 8.0) {
            assert!((p.length() - 8.0).abs() < 1e-4, "{p:?}");
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let a = sphere_positions(20, 8.0);
        let b = sphere_positions(20, 8.0);
        assert_eq!(a, b);
        assert_eq!(sphere_position(7, 20, 8.0), a[7]);
    }

    #[test]
    fn single_card_sits_on_the_equator() {
        // polar = acos(0) = pi/2 -> z = 0
        let p = sphere_position(0, 1, 8.0);
        assert!(p.z.abs() < 1e-5);
        assert!((p.length() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn first_and_last_cards_are_near_opposite_poles() {
        let n = 12;
        let first = sphere_position(0, n, 8.0);
        let last = sphere_position(n - 1, n, 8.0);
        assert!(first.z < -6.0);
        assert!(last.z > 6.0);
    }

    #[test]
    fn positions_are_distinct() {
        let positions = sphere_positions(50, 8.0);
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(a.distance(*b) > 0.1);
            }
        }
    }

    #[test]
    fn zero_cards_is_empty() {
        assert!(sphere_positions(0, 8.0).is_empty());
        assert_eq!(sphere_position(0, 0, 8.0), Vec3::ZERO);
    }
}
