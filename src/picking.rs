//! Ray-cast picking and click routing.
//!
//! A screen point is unprojected through the inverse view-projection into
//! a world ray, which is tested against every card's quad (double-sided,
//! in the card's local XY plane). The closest hit in front of the camera
//! wins, and [`route_click`] turns it into an action.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::article::ArticleId;
use crate::card::{CardSet, CardTransform};

/// World-space ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point on the near plane.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Closest card under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Card that was hit.
    pub id: ArticleId,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// What a click should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Open the focused card's article.
    Open(ArticleId),
    /// Focus a different card.
    Focus(ArticleId),
    /// Leave focus and return to the mode's canonical view.
    Reset,
    /// Nothing to do.
    Ignore,
}

/// Unproject a pixel position into a world ray.
///
/// Pixel coordinates have the origin at the top-left. Depth is in the
/// [0, 1] range. Returns `None` for an empty viewport or a singular
/// matrix.
#[must_use]
pub fn screen_to_ray(screen: Vec2, viewport: Vec2, view_proj: Mat4) -> Option<Ray> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let ndc_x = (screen.x / viewport.x) * 2.0 - 1.0;
    let ndc_y = 1.0 - (screen.y / viewport.y) * 2.0;

    let inv_view_proj = view_proj.inverse();
    let near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    let far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    if near.w.abs() <= f32::EPSILON || far.w.abs() <= f32::EPSILON {
        return None;
    }

    let origin = near.truncate() / near.w;
    let direction = (far.truncate() / far.w - origin).try_normalize()?;
    origin.is_finite().then_some(Ray { origin, direction })
}

/// Distance along `ray` to a `width` x `height` quad centered at the card
/// position, or `None` on a miss.
#[must_use]
pub fn intersect_card(ray: &Ray, transform: &CardTransform, width: f32, height: f32) -> Option<f32> {
    let normal = transform.orientation * Vec3::Z;
    let denom = normal.dot(ray.direction);
    if denom.abs() <= 1e-6 {
        return None;
    }
    let t = normal.dot(transform.position - ray.origin) / denom;
    if t <= 0.0 || !t.is_finite() {
        return None;
    }
    let local = transform.orientation.inverse() * (ray.at(t) - transform.position);
    (local.x.abs() <= width / 2.0 && local.y.abs() <= height / 2.0).then_some(t)
}

/// Closest card hit by `ray`.
#[must_use]
pub fn pick_card(ray: &Ray, cards: &CardSet, width: f32, height: f32) -> Option<PickHit> {
    cards
        .iter()
        .filter_map(|card| {
            intersect_card(ray, &card.transform, width, height).map(|distance| PickHit {
                id: card.id(),
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Decide what a click does given what it hit and what is focused.
#[must_use]
pub fn route_click(hit: Option<ArticleId>, focused: Option<ArticleId>) -> ClickAction {
    match (hit, focused) {
        (Some(id), Some(f)) if id == f => ClickAction::Open(id),
        (Some(id), _) => ClickAction::Focus(id),
        (None, Some(_)) => ClickAction::Reset,
        (None, None) => ClickAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;
    use crate::camera::Camera;
    use crate::card::tests::card_set;
    use crate::options::CameraOptions;

    fn camera_on_z(distance: f32) -> Camera {
        Camera::new(
            &CameraOptions::default(),
            4.0 / 3.0,
            Vec3::new(0.0, 0.0, distance),
            Vec3::ZERO,
        )
    }

    fn card_at(position: Vec3, orientation: Quat) -> CardTransform {
        CardTransform {
            position,
            orientation,
        }
    }

    #[test]
    fn center_of_screen_looks_down_the_view_axis() {
        let cam = camera_on_z(15.0);
        let ray = screen_to_ray(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0), cam.build_matrix())
            .unwrap();
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!(ray.origin.x.abs() < 1e-4 && ray.origin.y.abs() < 1e-4);
        assert!(ray.origin.z < 15.0 && ray.origin.z > 14.0);
    }

    #[test]
    fn screen_left_maps_to_negative_x() {
        let cam = camera_on_z(15.0);
        let ray = screen_to_ray(Vec2::new(0.0, 300.0), Vec2::new(800.0, 600.0), cam.build_matrix())
            .unwrap();
        assert!(ray.direction.x < 0.0);
        let ray = screen_to_ray(Vec2::new(400.0, 0.0), Vec2::new(800.0, 600.0), cam.build_matrix())
            .unwrap();
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn empty_viewport_has_no_ray() {
        let cam = camera_on_z(15.0);
        assert!(screen_to_ray(Vec2::ZERO, Vec2::new(0.0, 600.0), cam.build_matrix()).is_none());
    }

    #[test]
    fn quad_hit_and_miss() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let facing = card_at(Vec3::ZERO, Quat::IDENTITY);
        assert_eq!(intersect_card(&ray, &facing, 2.4, 1.8), Some(10.0));

        let off = card_at(Vec3::new(1.3, 0.0, 0.0), Quat::IDENTITY);
        assert!(intersect_card(&ray, &off, 2.4, 1.8).is_none());

        let behind = Ray {
            origin: Vec3::new(0.0, 0.0, -1.0),
            direction: Vec3::NEG_Z,
        };
        assert!(intersect_card(&behind, &facing, 2.4, 1.8).is_none());

        let edge_on = card_at(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(intersect_card(&ray, &edge_on, 2.4, 1.8).is_none());
    }

    #[test]
    fn rotated_quad_uses_local_extent() {
        let ray = Ray {
            origin: Vec3::new(1.1, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        // Rolled 90 degrees: the 2.4 width now runs along Y.
        let rolled = card_at(Vec3::ZERO, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!(intersect_card(&ray, &rolled, 2.4, 1.8).is_none());
        let upright = card_at(Vec3::ZERO, Quat::IDENTITY);
        assert!(intersect_card(&ray, &upright, 2.4, 1.8).is_some());
    }

    #[test]
    fn nearest_card_wins() {
        let mut cards = card_set(2);
        for (z, card) in [2.0, 5.0].into_iter().zip(cards.iter_mut()) {
            card.transform = card_at(Vec3::new(0.0, 0.0, z), Quat::IDENTITY);
        }
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let hit = pick_card(&ray, &cards, 2.4, 1.8).unwrap();
        assert_eq!(hit.id, ArticleId(2));
        assert_eq!(hit.distance, 5.0);
    }

    #[test]
    fn click_routing() {
        let a = Some(ArticleId(1));
        let b = Some(ArticleId(2));
        assert_eq!(route_click(a, a), ClickAction::Open(ArticleId(1)));
        assert_eq!(route_click(b, a), ClickAction::Focus(ArticleId(2)));
        assert_eq!(route_click(b, None), ClickAction::Focus(ArticleId(2)));
        assert_eq!(route_click(None, a), ClickAction::Reset);
        assert_eq!(route_click(None, None), ClickAction::Ignore);
    }
}
