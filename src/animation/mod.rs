//! Timed interpolation driven by an injected clock and frame scheduler.
//!
//! The [`Animator`] runs at most one animation at a time over a piece of
//! owned state. Each frame the host calls [`Animator::tick`] with the
//! current instant; the animator evaluates eased progress, hands it to the
//! animation's update callback, and asks the [`FrameScheduler`] for another
//! frame until progress reaches 1.

mod animator;
pub mod clock;
pub mod frame;
pub mod interpolation;

pub use animator::{AnimationHandle, Animator, DoneFn, TickFn};
pub use clock::{Clock, ManualClock, SystemClock};
pub use frame::{FrameRequestId, FrameScheduler, QueuedScheduler};
