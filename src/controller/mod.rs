//! View transition controller.
//!
//! [`ViewController`] owns the [`ViewState`] (mode, focus, camera pose,
//! cards) and is its only mutator. Mode switches, focus and reset start a
//! timed animation on the shared [`Animator`]; while one runs, every other
//! transition request and all direct camera control is refused. Refused
//! calls are silent no-ops that return `false`.

mod presentation;
mod state;

use std::time::Duration;

use glam::{Quat, Vec2, Vec3};
use web_time::Instant;

pub use presentation::{facing_rotation, idle_offset};
pub use state::{TransitionKind, ViewMode, ViewState};

use crate::animation::interpolation::{lerp_vec3, slerp_quat};
use crate::animation::{Animator, DoneFn, FrameScheduler, TickFn};
use crate::article::ArticleId;
use crate::camera::{CameraPose, OrbitController, Spherical};
use crate::card::{CardSet, CardTransform};
use crate::layout::GridLayout;
use crate::options::{
    AnimationOptions, AppearanceOptions, CameraOptions, LayoutOptions, Options,
};

/// Drives sphere/grid switching, card focus and camera resets.
pub struct ViewController {
    state: ViewState,
    animator: Animator<ViewState>,
    camera: CameraOptions,
    layout: LayoutOptions,
    animation: AnimationOptions,
    appearance: AppearanceOptions,
    direct_control: bool,
    epoch: Instant,
}

impl ViewController {
    /// Controller in sphere mode with no cards, camera at the canonical
    /// sphere pose. Idle float is timed from `epoch`.
    #[must_use]
    pub fn new(
        options: &Options,
        scheduler: Box<dyn FrameScheduler>,
        epoch: Instant,
    ) -> Self {
        Self {
            state: ViewState::new(CameraPose::canonical(options.camera.sphere_radius)),
            animator: Animator::new(scheduler),
            camera: options.camera.clone(),
            layout: options.layout.clone(),
            animation: options.animation.clone(),
            appearance: options.appearance.clone(),
            direct_control: false,
            epoch,
        }
    }

    /// Replace tunables. Takes effect for the next transition.
    pub fn set_options(&mut self, options: &Options) {
        self.camera = options.camera.clone();
        self.layout = options.layout.clone();
        self.animation = options.animation.clone();
        self.appearance = options.appearance.clone();
        self.state.cards.relayout_grid(&self.layout);
    }

    /// Install a fully built card set.
    ///
    /// Any running transition is cancelled and focus cleared; cards are
    /// placed at their slot for the current mode and the camera returns to
    /// that mode's canonical pose.
    pub fn set_cards(&mut self, cards: CardSet) {
        self.cancel();
        self.state.cards = cards;
        self.state.focused = None;
        let grid = self.state.mode == ViewMode::Grid;
        for card in self.state.cards.iter_mut() {
            card.transform = CardTransform {
                position: if grid {
                    card.grid_position
                } else {
                    card.sphere_position()
                },
                orientation: Quat::IDENTITY,
            };
        }
        self.state.pose = self.canonical_pose(self.state.mode);
        log::info!("{} cards ready in {} mode", self.state.cards.len(), self.state.mode);
    }

    /// Read-only view of the controlled state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.state.mode
    }

    /// Focused card, if any.
    #[must_use]
    pub fn focused(&self) -> Option<ArticleId> {
        self.state.focused
    }

    /// Current camera pose.
    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.state.pose
    }

    /// Cards.
    #[must_use]
    pub fn cards(&self) -> &CardSet {
        &self.state.cards
    }

    /// Whether a transition is running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    /// Whether the user is dragging the camera.
    #[must_use]
    pub fn has_direct_control(&self) -> bool {
        self.direct_control
    }

    /// Start direct camera control. Refused while transitioning.
    pub fn begin_direct_control(&mut self) -> bool {
        if self.is_transitioning() {
            log::debug!("direct control refused: transition running");
            return false;
        }
        self.direct_control = true;
        true
    }

    /// End direct camera control.
    pub fn end_direct_control(&mut self) {
        self.direct_control = false;
    }

    /// Orbit the camera by a pointer delta. Requires direct control.
    pub fn orbit_rotate(&mut self, orbit: &OrbitController, delta: Vec2) -> bool {
        if self.is_transitioning() || !self.direct_control {
            return false;
        }
        orbit.rotate(&mut self.state.pose, delta);
        true
    }

    /// Zoom the camera by a wheel delta, within the current mode's band.
    pub fn orbit_zoom(&mut self, orbit: &OrbitController, delta: f32) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let band = match self.state.mode {
            ViewMode::Sphere => orbit.sphere_band(),
            ViewMode::Grid => orbit.grid_band(self.grid_camera_radius()),
        };
        orbit.zoom(&mut self.state.pose, delta, band);
        true
    }

    /// Camera distance that frames the whole grid:
    /// `max(width, height, min_extent) * scale + offset`.
    #[must_use]
    pub fn grid_camera_radius(&self) -> f32 {
        let count = self.state.cards.len();
        if count == 0 {
            return self.camera.grid_empty_radius;
        }
        let grid = GridLayout::from_options(count, &self.layout);
        grid.width().max(grid.height()).max(self.camera.grid_min_extent)
            * self.camera.grid_extent_scale
            + self.camera.grid_extent_offset
    }

    /// Canonical pose of `mode`: on the +Z axis looking at the origin.
    #[must_use]
    pub fn canonical_pose(&self, mode: ViewMode) -> CameraPose {
        let radius = match mode {
            ViewMode::Sphere => self.camera.sphere_radius,
            ViewMode::Grid => self.grid_camera_radius(),
        };
        CameraPose::canonical(radius)
    }

    /// Camera distance from a focused card in the current mode.
    #[must_use]
    pub fn focus_distance(&self) -> f32 {
        match self.state.mode {
            ViewMode::Sphere => self.camera.sphere_focus_distance,
            ViewMode::Grid => self.layout.card_width * self.camera.grid_focus_widths,
        }
    }

    /// Refusal reason shared by every transition entry point.
    fn busy(&self, op: &str) -> bool {
        if self.is_transitioning() {
            log::debug!("{op} ignored: transition running");
            return true;
        }
        if self.direct_control {
            log::debug!("{op} ignored: camera under direct control");
            return true;
        }
        false
    }

    /// Animate into the grid. Returns whether the switch started.
    pub fn switch_to_grid(&mut self, now: Instant) -> bool {
        self.switch_mode(ViewMode::Grid, now)
    }

    /// Animate back onto the sphere. Returns whether the switch started.
    pub fn switch_to_sphere(&mut self, now: Instant) -> bool {
        self.switch_mode(ViewMode::Sphere, now)
    }

    /// Switch to whichever mode is not current.
    pub fn toggle_view(&mut self, now: Instant) -> bool {
        self.switch_mode(self.state.mode.toggled(), now)
    }

    fn switch_mode(&mut self, target: ViewMode, now: Instant) -> bool {
        if self.busy("mode switch") {
            return false;
        }
        if self.state.mode == target {
            log::debug!("mode switch ignored: already in {target} mode");
            return false;
        }
        if self.state.cards.is_empty() {
            log::debug!("mode switch ignored: no cards");
            return false;
        }

        let start_pose = self.state.pose;
        let mut end_pose = self.canonical_pose(target);
        end_pose.spherical = end_pose.spherical.with_azimuth_near(start_pose.spherical.azimuth);

        let starts = self.state.cards.transforms();
        let ends: Vec<Vec3> = self
            .state
            .cards
            .iter()
            .map(|c| match target {
                ViewMode::Grid => c.grid_position,
                ViewMode::Sphere => c.sphere_position(),
            })
            .collect();
        let done_ends = ends.clone();

        let on_tick: TickFn<ViewState> = Box::new(move |s: &mut ViewState, t: f32| {
            s.pose = start_pose.lerp(&end_pose, t);
            for ((card, start), end) in s.cards.iter_mut().zip(&starts).zip(&ends) {
                card.transform.position = lerp_vec3(t, start.position, *end);
                card.transform.orientation = slerp_quat(t, start.orientation, Quat::IDENTITY);
            }
        });
        let on_done: DoneFn<ViewState> = Box::new(move |s: &mut ViewState| {
            s.mode = target;
            s.pose = end_pose;
            for (card, end) in s.cards.iter_mut().zip(&done_ends) {
                card.transform.position = *end;
                card.transform.orientation = Quat::IDENTITY;
            }
            s.transition = None;
            log::debug!("now in {target} mode");
        });

        let kind = match target {
            ViewMode::Grid => TransitionKind::ToGrid,
            ViewMode::Sphere => TransitionKind::ToSphere,
        };
        self.state.focused = None;
        self.start_transition(kind, now, self.animation.view_switch_ms, on_tick, on_done)
    }

    /// Fly the camera to card `id`. Focus is set immediately; cards do not
    /// move. Returns whether the focus started.
    pub fn focus_on_card(&mut self, id: ArticleId, now: Instant) -> bool {
        if self.busy("focus") {
            return false;
        }
        let Some(card) = self.state.cards.get(id) else {
            log::debug!("focus ignored: no card for article {id}");
            return false;
        };
        let card_position = card.transform.position;
        let distance = self.focus_distance();

        let start_pose = self.state.pose;
        let offset = start_pose.eye() - card_position;
        let spherical = Spherical::from_offset(offset)
            .map_or(start_pose.spherical, |s| s.with_azimuth_near(start_pose.spherical.azimuth));
        let end_pose = CameraPose {
            spherical: Spherical {
                radius: distance,
                ..spherical
            },
            target: card_position,
        };

        self.state.focused = Some(id);
        log::debug!("focusing article {id}");
        self.animate_camera(TransitionKind::Focus, now, start_pose, end_pose)
    }

    /// Clear focus and return the camera to the canonical pose of the
    /// current mode. Returns whether the reset started.
    pub fn reset_view(&mut self, now: Instant) -> bool {
        if self.busy("reset") {
            return false;
        }
        let start_pose = self.state.pose;
        let mut end_pose = self.canonical_pose(self.state.mode);
        end_pose.spherical = end_pose.spherical.with_azimuth_near(start_pose.spherical.azimuth);

        self.state.focused = None;
        self.animate_camera(TransitionKind::Reset, now, start_pose, end_pose)
    }

    fn animate_camera(
        &mut self,
        kind: TransitionKind,
        now: Instant,
        start_pose: CameraPose,
        end_pose: CameraPose,
    ) -> bool {
        let on_tick: TickFn<ViewState> = Box::new(move |s: &mut ViewState, t: f32| {
            s.pose = start_pose.lerp(&end_pose, t);
        });
        let on_done: DoneFn<ViewState> = Box::new(move |s: &mut ViewState| {
            s.pose = end_pose;
            s.transition = None;
        });
        self.start_transition(kind, now, self.animation.focus_ms, on_tick, on_done)
    }

    fn start_transition(
        &mut self,
        kind: TransitionKind,
        now: Instant,
        duration_ms: u64,
        on_tick: TickFn<ViewState>,
        on_done: DoneFn<ViewState>,
    ) -> bool {
        let started = self
            .animator
            .start(
                now,
                Duration::from_millis(duration_ms),
                self.animation.easing,
                on_tick,
                on_done,
            )
            .is_some();
        if started {
            self.state.transition = Some(kind);
        }
        started
    }

    /// Advance to `now`: step the running transition, then float, tint and
    /// orient the cards. Returns whether a transition is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let running = self.animator.tick(now, &mut self.state);

        if !self.state.is_transitioning()
            && self.animation.idle_float
            && self.state.mode == ViewMode::Sphere
            && self.state.focused.is_none()
        {
            let elapsed_ms = now.saturating_duration_since(self.epoch).as_secs_f64() * 1000.0;
            presentation::apply_idle_float(&mut self.state, elapsed_ms, &self.animation);
        }
        presentation::apply_appearance(&mut self.state, &self.appearance);
        presentation::apply_orientation(&mut self.state);
        running
    }

    /// Stop any running transition without completing it.
    pub fn cancel(&mut self) {
        self.animator.cancel();
        self.state.transition = None;
    }
}

impl std::fmt::Debug for ViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewController")
            .field("mode", &self.state.mode)
            .field("focused", &self.state.focused)
            .field("transition", &self.state.transition)
            .field("cards", &self.state.cards.len())
            .field("direct_control", &self.direct_control)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::animation::{Clock, ManualClock, QueuedScheduler};
    use crate::card::tests::card_set;
    use crate::options::OrbitOptions;

    struct Harness {
        ctl: ViewController,
        clock: ManualClock,
        sched: QueuedScheduler,
    }

    impl Harness {
        fn with_cards(count: u32) -> Self {
            let clock = ManualClock::new();
            let sched = QueuedScheduler::new();
            let mut ctl =
                ViewController::new(&Options::default(), Box::new(sched.clone()), clock.now());
            ctl.set_cards(card_set(count));
            Self { ctl, clock, sched }
        }

        fn now(&self) -> Instant {
            self.clock.now()
        }

        /// Advance the clock and run one frame.
        fn step(&mut self, ms: u64) -> bool {
            let _ = self.sched.take_pending();
            self.clock.advance_ms(ms);
            self.ctl.tick(self.clock.now())
        }

        /// Run frames until the transition settles.
        fn settle(&mut self) {
            let settled = (0..100).any(|_| !self.step(100));
            assert!(settled, "transition never settled");
        }
    }

    fn assert_pose_eq(a: &CameraPose, b: &CameraPose) {
        assert_eq!(a.spherical, b.spherical, "spherical");
        assert_eq!(a.target, b.target, "target");
    }

    #[test]
    fn grid_radius_formula() {
        let h = Harness::with_cards(12);
        // 4x3 grid: width 9, height 4.8.
        assert!((h.ctl.grid_camera_radius() - (9.0 * 1.2 + 8.0)).abs() < 1e-5);

        let small = Harness::with_cards(2);
        // 2 columns, 1 row: width 3 < min extent 6.
        assert!((small.ctl.grid_camera_radius() - (6.0 * 1.2 + 8.0)).abs() < 1e-5);

        let empty = Harness::with_cards(0);
        assert_eq!(empty.ctl.grid_camera_radius(), 10.0);
    }

    #[test]
    fn switch_to_grid_lands_exactly_on_targets() {
        let mut h = Harness::with_cards(12);
        assert!(h.ctl.switch_to_grid(h.now()));
        assert!(h.ctl.is_transitioning());
        assert_eq!(h.ctl.mode(), ViewMode::Sphere);
        assert!(h.sched.has_pending());

        assert!(h.step(750));
        h.settle();

        assert_eq!(h.ctl.mode(), ViewMode::Grid);
        assert!(!h.ctl.is_transitioning());
        assert_pose_eq(h.ctl.pose(), &h.ctl.canonical_pose(ViewMode::Grid));
        for card in h.ctl.cards() {
            assert_eq!(card.transform.position, card.grid_position);
            assert_eq!(card.transform.orientation, Quat::IDENTITY);
        }
        assert!(!h.sched.has_pending());
    }

    #[test]
    fn mid_switch_cards_are_between_homes() {
        let mut h = Harness::with_cards(4);
        let starts = h.ctl.cards().transforms();
        assert!(h.ctl.switch_to_grid(h.now()));
        let _ = h.step(750);
        for (card, start) in h.ctl.cards().iter().zip(&starts) {
            let expected = (start.position + card.grid_position) / 2.0;
            assert!((card.transform.position - expected).length() < 1e-4);
        }
    }

    #[test]
    fn switch_to_grid_is_noop_when_already_in_grid() {
        let mut h = Harness::with_cards(3);
        assert!(h.ctl.switch_to_grid(h.now()));
        h.settle();
        let before = h.sched.requested();
        assert!(!h.ctl.switch_to_grid(h.now()));
        assert!(!h.ctl.is_transitioning());
        assert_eq!(h.sched.requested(), before);
    }

    #[test]
    fn switch_is_noop_while_transitioning() {
        let mut h = Harness::with_cards(3);
        assert!(h.ctl.switch_to_grid(h.now()));
        let _ = h.step(100);
        assert!(!h.ctl.switch_to_sphere(h.now()));
        assert!(!h.ctl.focus_on_card(ArticleId(1), h.now()));
        assert!(!h.ctl.reset_view(h.now()));
        assert_eq!(h.ctl.state().transition(), Some(TransitionKind::ToGrid));
    }

    #[test]
    fn switch_is_noop_without_cards() {
        let mut h = Harness::with_cards(0);
        assert!(!h.ctl.switch_to_grid(h.now()));
        assert!(!h.ctl.is_transitioning());
        assert_eq!(h.ctl.mode(), ViewMode::Sphere);
        assert_eq!(h.sched.requested(), 0);
    }

    #[test]
    fn switch_is_noop_under_direct_control() {
        let mut h = Harness::with_cards(3);
        assert!(h.ctl.begin_direct_control());
        assert!(!h.ctl.switch_to_grid(h.now()));
        h.ctl.end_direct_control();
        assert!(h.ctl.switch_to_grid(h.now()));
    }

    #[test]
    fn switch_back_to_sphere_restores_homes() {
        let mut h = Harness::with_cards(6);
        assert!(h.ctl.toggle_view(h.now()));
        h.settle();
        assert!(h.ctl.toggle_view(h.now()));
        h.settle();
        assert_eq!(h.ctl.mode(), ViewMode::Sphere);
        assert_pose_eq(h.ctl.pose(), &CameraPose::canonical(15.0));
        // Idle float keeps cards within the amplitude of home.
        for card in h.ctl.cards() {
            assert!((card.transform.position - card.sphere_position()).length() < 0.07);
        }
    }

    #[test]
    fn mode_switch_clears_focus() {
        let mut h = Harness::with_cards(4);
        assert!(h.ctl.focus_on_card(ArticleId(2), h.now()));
        h.settle();
        assert!(h.ctl.switch_to_grid(h.now()));
        assert_eq!(h.ctl.focused(), None);
    }

    #[test]
    fn focus_is_set_synchronously() {
        let mut h = Harness::with_cards(8);
        assert!(h.ctl.focus_on_card(ArticleId(5), h.now()));
        assert_eq!(h.ctl.focused(), Some(ArticleId(5)));
        assert_eq!(h.ctl.state().transition(), Some(TransitionKind::Focus));
    }

    #[test]
    fn focus_unknown_card_is_noop() {
        let mut h = Harness::with_cards(3);
        assert!(!h.ctl.focus_on_card(ArticleId(42), h.now()));
        assert_eq!(h.ctl.focused(), None);
        assert!(!h.ctl.is_transitioning());
    }

    #[test]
    fn focus_places_camera_at_focus_distance() {
        let mut h = Harness::with_cards(8);
        let card_pos = h.ctl.cards().get(ArticleId(3)).unwrap().transform.position;
        let eye_before = h.ctl.pose().eye();
        assert!(h.ctl.focus_on_card(ArticleId(3), h.now()));
        h.settle();

        let pose = *h.ctl.pose();
        assert_eq!(pose.target, card_pos);
        assert!((pose.spherical.radius - 3.5).abs() < 1e-6);
        let expected_dir = (eye_before - card_pos).normalize();
        let actual_dir = (pose.eye() - card_pos).normalize();
        assert!((expected_dir - actual_dir).length() < 1e-4);
        // Cards did not move.
        assert_eq!(h.ctl.cards().get(ArticleId(3)).unwrap().transform.position, card_pos);
    }

    #[test]
    fn focus_in_grid_uses_card_widths() {
        let mut h = Harness::with_cards(9);
        assert!(h.ctl.switch_to_grid(h.now()));
        h.settle();
        assert!(h.ctl.focus_on_card(ArticleId(1), h.now()));
        h.settle();
        assert!((h.ctl.pose().spherical.radius - 4.8).abs() < 1e-5);
    }

    #[test]
    fn degenerate_focus_direction_keeps_angles() {
        let mut h = Harness::with_cards(3);
        // Put the card exactly where the camera is.
        let eye = h.ctl.pose().eye();
        if let Some(card) = h.ctl.state.cards.get_mut(ArticleId(1)) {
            card.transform.position = eye;
        }
        let before = h.ctl.pose().spherical;
        h.ctl.animation.idle_float = false;
        assert!(h.ctl.focus_on_card(ArticleId(1), h.now()));
        h.settle();
        let after = h.ctl.pose().spherical;
        assert_eq!(after.polar, before.polar);
        assert_eq!(after.azimuth, before.azimuth);
        assert_eq!(after.radius, 3.5);
        assert!(after.is_finite());
    }

    #[test]
    fn focus_then_click_empty_space_resets() {
        let mut h = Harness::with_cards(8);
        assert!(h.ctl.focus_on_card(ArticleId(5), h.now()));
        h.settle();
        assert_eq!(h.ctl.focused(), Some(ArticleId(5)));

        assert!(h.ctl.reset_view(h.now()));
        assert_eq!(h.ctl.focused(), None);
        let _ = h.step(1000);
        assert!(!h.ctl.is_transitioning());
        assert_pose_eq(h.ctl.pose(), &CameraPose::canonical(15.0));
    }

    #[test]
    fn reset_in_grid_returns_to_grid_pose() {
        let mut h = Harness::with_cards(5);
        assert!(h.ctl.switch_to_grid(h.now()));
        h.settle();
        let orbit = OrbitController::new(OrbitOptions::default());
        assert!(h.ctl.orbit_zoom(&orbit, -500.0));
        assert!(h.ctl.reset_view(h.now()));
        h.settle();
        assert_pose_eq(h.ctl.pose(), &h.ctl.canonical_pose(ViewMode::Grid));
    }

    #[test]
    fn appearance_follows_focus() {
        let mut h = Harness::with_cards(3);
        let _ = h.step(16);
        assert!(h.ctl.cards().iter().all(|c| c.appearance.opacity == 1.0));

        assert!(h.ctl.focus_on_card(ArticleId(2), h.now()));
        let _ = h.step(16);
        for card in h.ctl.cards() {
            if card.id() == ArticleId(2) {
                assert_eq!(card.appearance.opacity, 1.0);
                assert_eq!(card.appearance.emissive, [17.0 / 255.0; 3]);
            } else {
                assert_eq!(card.appearance.opacity, 0.15);
                assert_eq!(card.appearance.emissive, [0.0; 3]);
            }
        }
    }

    #[test]
    fn sphere_cards_face_the_camera() {
        let mut h = Harness::with_cards(5);
        let _ = h.step(16);
        let eye = h.ctl.pose().eye();
        for card in h.ctl.cards() {
            let facing = card.transform.orientation * Vec3::Z;
            let to_eye = (eye - card.transform.position).normalize();
            assert!((facing - to_eye).length() < 1e-4);
        }
    }

    #[test]
    fn unfocused_grid_cards_lie_flat() {
        let mut h = Harness::with_cards(5);
        assert!(h.ctl.switch_to_grid(h.now()));
        h.settle();
        let _ = h.step(16);
        assert!(h.ctl.cards().iter().all(|c| c.transform.orientation == Quat::IDENTITY));
    }

    #[test]
    fn idle_float_pauses_while_focused() {
        let mut h = Harness::with_cards(4);
        assert!(h.ctl.focus_on_card(ArticleId(1), h.now()));
        let frozen = h.ctl.cards().transforms();
        let _ = h.step(500);
        let _ = h.step(500);
        for (card, before) in h.ctl.cards().iter().zip(&frozen) {
            assert_eq!(card.transform.position, before.position);
        }
    }

    #[test]
    fn idle_float_continues_while_dragging() {
        let mut h = Harness::with_cards(4);
        assert!(h.ctl.begin_direct_control());
        let homes = h.ctl.cards().transforms();
        let _ = h.step(5000);
        let moved = h
            .ctl
            .cards()
            .iter()
            .zip(&homes)
            .filter(|(card, before)| card.transform.position != before.position)
            .count();
        assert_eq!(moved, 4);
    }

    #[test]
    fn new_cards_reset_a_focused_sphere_camera() {
        let mut h = Harness::with_cards(8);
        assert!(h.ctl.focus_on_card(ArticleId(3), h.now()));
        h.settle();
        assert!((h.ctl.pose().spherical.radius - 3.5).abs() < 1e-4);

        h.ctl.set_cards(card_set(4));
        assert_eq!(h.ctl.focused(), None);
        assert_eq!(h.ctl.mode(), ViewMode::Sphere);
        assert_pose_eq(h.ctl.pose(), &h.ctl.canonical_pose(ViewMode::Sphere));
        assert_eq!(h.ctl.pose().target, Vec3::ZERO);
        assert_eq!(h.ctl.pose().spherical.radius, 15.0);
    }

    #[test]
    fn direct_control_refused_while_transitioning() {
        let mut h = Harness::with_cards(3);
        assert!(h.ctl.switch_to_grid(h.now()));
        assert!(!h.ctl.begin_direct_control());
        let orbit = OrbitController::new(OrbitOptions::default());
        assert!(!h.ctl.orbit_zoom(&orbit, 100.0));
        assert!(!h.ctl.orbit_rotate(&orbit, Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn orbit_rotate_needs_direct_control() {
        let mut h = Harness::with_cards(3);
        let orbit = OrbitController::new(OrbitOptions::default());
        assert!(!h.ctl.orbit_rotate(&orbit, Vec2::new(10.0, 0.0)));
        assert!(h.ctl.begin_direct_control());
        assert!(h.ctl.orbit_rotate(&orbit, Vec2::new(0.0, 10_000.0)));
        assert!((h.ctl.pose().spherical.polar - 0.05).abs() < 1e-6);
        assert!(h.ctl.pose().spherical.polar < FRAC_PI_2);
    }

    #[test]
    fn grid_zoom_band_scales_with_grid() {
        let mut h = Harness::with_cards(12);
        assert!(h.ctl.switch_to_grid(h.now()));
        h.settle();
        let orbit = OrbitController::new(OrbitOptions::default());
        assert!(h.ctl.orbit_zoom(&orbit, 1.0e6));
        let r = h.ctl.grid_camera_radius();
        assert!((h.ctl.pose().spherical.radius - 2.5 * r).abs() < 1e-4);
    }

    #[test]
    fn cancel_leaves_state_unsettled_but_unlocked() {
        let mut h = Harness::with_cards(3);
        assert!(h.ctl.switch_to_grid(h.now()));
        let _ = h.step(300);
        h.ctl.cancel();
        assert!(!h.ctl.is_transitioning());
        assert_eq!(h.ctl.mode(), ViewMode::Sphere);
        assert!(!h.sched.has_pending());
        assert!(h.ctl.switch_to_grid(h.now()));
    }
}
