//! Display-refresh scheduling.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifier of an outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(pub u64);

/// Host hook for "call me again on the next display refresh".
pub trait FrameScheduler {
    /// Request one more frame.
    fn request_frame(&mut self) -> FrameRequestId;
    /// Withdraw a request that has not been serviced yet.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

#[derive(Debug, Default)]
struct QueueState {
    next_id: u64,
    pending: Option<FrameRequestId>,
    requested: usize,
    cancelled: usize,
}

/// Scheduler that queues at most one pending request for the host loop to
/// poll.
///
/// Clones share the queue: hand one to the animator and keep one in the
/// loop that drives frames.
#[derive(Debug, Clone, Default)]
pub struct QueuedScheduler {
    state: Rc<RefCell<QueueState>>,
}

impl QueuedScheduler {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame has been requested and not yet taken or cancelled.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    /// Take the pending request, if any. The host should run one frame for
    /// each request it takes.
    pub fn take_pending(&self) -> Option<FrameRequestId> {
        self.state.borrow_mut().pending.take()
    }

    /// Total number of requests made.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.state.borrow().requested
    }

    /// Total number of requests withdrawn before being taken.
    #[must_use]
    pub fn cancelled(&self) -> usize {
        self.state.borrow().cancelled
    }
}

impl FrameScheduler for QueuedScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = FrameRequestId(state.next_id);
        state.pending = Some(id);
        state.requested += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        let mut state = self.state.borrow_mut();
        if state.pending == Some(id) {
            state.pending = None;
            state.cancelled += 1;
        }
    }
}
