//! Per-frame card presentation: idle float, appearance and orientation.

use glam::{Mat3, Quat, Vec3};

use super::state::{TransitionKind, ViewMode, ViewState};
use crate::card::CardAppearance;
use crate::options::{AnimationOptions, AppearanceOptions};

/// Offset of card `index` from its sphere home at `elapsed_ms`.
///
/// Always measured from the fixed home, so the motion is bounded by the
/// amplitude and never drifts.
#[must_use]
pub fn idle_offset(index: usize, elapsed_ms: f64, opts: &AnimationOptions) -> Vec3 {
    let t = elapsed_ms * f64::from(opts.idle_speed);
    let i = index as f64;
    let [px, py, pz] = opts.idle_phase.map(f64::from);
    let amp = opts.idle_amplitude;
    Vec3::new(
        (t + i * px).sin() as f32 * amp,
        (t + i * py).cos() as f32 * amp,
        (t + i * pz).sin() as f32 * amp,
    )
}

/// Rotation that turns a card's +Z face toward `target`.
#[must_use]
pub fn facing_rotation(from: Vec3, target: Vec3) -> Quat {
    let Some(z) = (target - from).try_normalize() else {
        return Quat::IDENTITY;
    };
    let x = Vec3::Y
        .cross(z)
        .try_normalize()
        .unwrap_or_else(|| Vec3::X.cross(z).normalize_or(Vec3::X));
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Float cards around their sphere homes.
pub(super) fn apply_idle_float(state: &mut ViewState, elapsed_ms: f64, opts: &AnimationOptions) {
    for (i, card) in state.cards.iter_mut().enumerate() {
        card.transform.position = card.sphere_position() + idle_offset(i, elapsed_ms, opts);
    }
}

/// Highlight the focused card and dim the rest; everyone is opaque when
/// nothing is focused.
pub(super) fn apply_appearance(state: &mut ViewState, opts: &AppearanceOptions) {
    let focused = state.focused;
    for card in state.cards.iter_mut() {
        card.appearance = match focused {
            Some(id) if id == card.id() => CardAppearance {
                opacity: 1.0,
                emissive: opts.focused_emissive,
            },
            Some(_) => CardAppearance {
                opacity: opts.dimmed_opacity,
                emissive: [0.0; 3],
            },
            None => CardAppearance::default(),
        };
    }
}

/// Face the camera in sphere mode or while a card is focused; lie flat
/// in an unfocused grid. Mode transitions tween orientation themselves.
pub(super) fn apply_orientation(state: &mut ViewState) {
    if state.transition.is_some_and(TransitionKind::moves_cards) {
        return;
    }
    let eye = state.pose.eye();
    let face_camera = state.mode == ViewMode::Sphere || state.focused.is_some();
    for card in state.cards.iter_mut() {
        card.transform.orientation = if face_camera {
            facing_rotation(card.transform.position, eye)
        } else {
            Quat::IDENTITY
        };
    }
}
