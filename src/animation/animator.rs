//! Single-slot animation runner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use web_time::Instant;

use super::frame::{FrameRequestId, FrameScheduler};
use crate::util::easing::EasingFunction;

/// Per-frame update callback: receives the state and eased progress.
pub type TickFn<S> = Box<dyn FnMut(&mut S, f32)>;

/// Completion callback, called once after the final update.
pub type DoneFn<S> = Box<dyn FnOnce(&mut S)>;

/// Cancellation handle for a started animation.
///
/// Cancelling drops both callbacks without calling them; the animator
/// notices on its next `tick`, `start` or `cancel` and withdraws any
/// pending frame request.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    cancelled: Arc<AtomicBool>,
}

impl AnimationHandle {
    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

struct ActiveAnimation<S> {
    start: Instant,
    duration: Duration,
    easing: EasingFunction,
    on_tick: TickFn<S>,
    on_done: DoneFn<S>,
    cancelled: Arc<AtomicBool>,
    frame: Option<FrameRequestId>,
}

impl<S> ActiveAnimation<S> {
    /// Raw progress in [0, 1]. Zero-length animations are complete at once.
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Runs at most one timed animation over state `S`.
pub struct Animator<S> {
    scheduler: Box<dyn FrameScheduler>,
    active: Option<ActiveAnimation<S>>,
}

impl<S> Animator<S> {
    /// Animator that requests frames from `scheduler`.
    #[must_use]
    pub fn new(scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            active: None,
        }
    }

    /// Whether an animation is running (and not cancelled).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| !a.cancelled.load(Ordering::Acquire))
    }

    /// Start an animation at `now`.
    ///
    /// Returns `None` without touching either callback if another animation
    /// is still running.
    pub fn start(
        &mut self,
        now: Instant,
        duration: Duration,
        easing: EasingFunction,
        on_tick: TickFn<S>,
        on_done: DoneFn<S>,
    ) -> Option<AnimationHandle> {
        self.reap_cancelled();
        if self.active.is_some() {
            log::debug!("animation rejected: another animation is active");
            return None;
        }
        let cancelled = Arc::new(AtomicBool::new(false));
        let frame = Some(self.scheduler.request_frame());
        self.active = Some(ActiveAnimation {
            start: now,
            duration,
            easing,
            on_tick,
            on_done,
            cancelled: Arc::clone(&cancelled),
            frame,
        });
        Some(AnimationHandle { cancelled })
    }

    /// Advance the running animation to `now`.
    ///
    /// Calls the update callback with eased progress, then either requests
    /// another frame or, at progress 1, calls the completion callback and
    /// clears the slot. Returns `true` if an animation is still running
    /// afterwards.
    pub fn tick(&mut self, now: Instant, state: &mut S) -> bool {
        self.reap_cancelled();
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        // The pending request is the one being serviced by this call.
        active.frame = None;

        let progress = active.progress(now);
        let eased = active.easing.evaluate(progress);
        (active.on_tick)(state, eased);

        if progress < 1.0 {
            active.frame = Some(self.scheduler.request_frame());
            return true;
        }

        if let Some(done) = self.active.take() {
            (done.on_done)(state);
        }
        false
    }

    /// Cancel the running animation, if any. Neither callback is called.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancelled.store(true, Ordering::Release);
            if let Some(id) = active.frame {
                self.scheduler.cancel_frame(id);
            }
            log::debug!("animation cancelled");
        }
    }

    /// Drop an animation whose handle was cancelled.
    fn reap_cancelled(&mut self) {
        let cancelled = self
            .active
            .as_ref()
            .is_some_and(|a| a.cancelled.load(Ordering::Acquire));
        if cancelled {
            self.cancel();
        }
    }
}

impl<S> std::fmt::Debug for Animator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::frame::QueuedScheduler;

    #[derive(Default)]
    struct Recorder {
        ticks: Vec<f32>,
        done: usize,
    }

    fn record_tick() -> TickFn<Recorder> {
        Box::new(|p: &mut Recorder, t| p.ticks.push(t))
    }

    fn record_done() -> DoneFn<Recorder> {
        Box::new(|p: &mut Recorder| p.done += 1)
    }

    fn animator() -> (Animator<Recorder>, QueuedScheduler) {
        let sched = QueuedScheduler::new();
        (Animator::new(Box::new(sched.clone())), sched)
    }

    #[test]
    fn runs_to_completion_and_calls_done_once() {
        let (mut anim, sched) = animator();
        let mut recorder = Recorder::default();
        let t0 = Instant::now();
        let handle = anim.start(
            t0,
            Duration::from_millis(1000),
            EasingFunction::CubicInOut,
            record_tick(),
            record_done(),
        );
        assert!(handle.is_some());
        assert!(sched.has_pending());

        assert!(anim.tick(t0 + Duration::from_millis(500), &mut recorder));
        assert_eq!(recorder.ticks, vec![0.5]);
        assert!(sched.has_pending());

        assert!(!anim.tick(t0 + Duration::from_millis(1200), &mut recorder));
        assert_eq!(recorder.ticks, vec![0.5, 1.0]);
        assert_eq!(recorder.done, 1);
        assert!(!anim.is_active());

        // Further ticks do nothing.
        assert!(!anim.tick(t0 + Duration::from_millis(2000), &mut recorder));
        assert_eq!(recorder.done, 1);
        assert_eq!(recorder.ticks.len(), 2);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let (mut anim, _sched) = animator();
        let mut recorder = Recorder::default();
        let t0 = Instant::now();
        let _ = anim.start(
            t0,
            Duration::ZERO,
            EasingFunction::CubicInOut,
            record_tick(),
            record_done(),
        );
        assert!(!anim.tick(t0, &mut recorder));
        assert_eq!(recorder.ticks, vec![1.0]);
        assert_eq!(recorder.done, 1);
    }

    #[test]
    fn second_start_is_rejected_while_active() {
        let (mut anim, _sched) = animator();
        let t0 = Instant::now();
        let first = anim.start(
            t0,
            Duration::from_millis(100),
            EasingFunction::Linear,
            record_tick(),
            record_done(),
        );
        let second = anim.start(
            t0,
            Duration::from_millis(100),
            EasingFunction::Linear,
            record_tick(),
            record_done(),
        );
        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[test]
    fn handle_cancel_drops_callbacks_and_frame() {
        let (mut anim, sched) = animator();
        let mut recorder = Recorder::default();
        let t0 = Instant::now();
        let handle = anim
            .start(
                t0,
                Duration::from_millis(100),
                EasingFunction::Linear,
                record_tick(),
                record_done(),
            )
            .unwrap();
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(!anim.is_active());

        assert!(!anim.tick(t0 + Duration::from_millis(200), &mut recorder));
        assert!(recorder.ticks.is_empty());
        assert_eq!(recorder.done, 0);
        assert!(!sched.has_pending());
        assert_eq!(sched.cancelled(), 1);
    }

    #[test]
    fn animator_cancel_withdraws_pending_frame() {
        let (mut anim, sched) = animator();
        let mut recorder = Recorder::default();
        let t0 = Instant::now();
        let _ = anim.start(
            t0,
            Duration::from_millis(100),
            EasingFunction::Linear,
            record_tick(),
            record_done(),
        );
        assert!(anim.tick(t0 + Duration::from_millis(10), &mut recorder));
        anim.cancel();
        assert!(!sched.has_pending());
        assert_eq!(recorder.done, 0);

        // The slot is free again.
        assert!(anim
            .start(
                t0,
                Duration::ZERO,
                EasingFunction::Linear,
                record_tick(),
                record_done(),
            )
            .is_some());
    }

    #[test]
    fn tick_before_start_clamps_to_zero() {
        let (mut anim, _sched) = animator();
        let mut recorder = Recorder::default();
        let t0 = Instant::now() + Duration::from_secs(5);
        let _ = anim.start(
            t0,
            Duration::from_millis(100),
            EasingFunction::Linear,
            record_tick(),
            record_done(),
        );
        assert!(anim.tick(t0 - Duration::from_secs(1), &mut recorder));
        assert_eq!(recorder.ticks, vec![0.0]);
    }
}
