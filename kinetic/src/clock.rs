use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;

/// Identifier of a requested animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameId(pub u64);

/// Time source and animation-frame scheduler injected into every scroll domain.
///
/// A domain calls [`FrameClock::request_frame`] when it needs another tick and remembers the
/// returned id. The host is expected to deliver that frame later by calling the domain's
/// `frame(id)` method (once per display refresh). A domain only ever has one pending frame: it
/// cancels the previous one before requesting another, so two decay chains can never run at the
/// same time.
pub trait FrameClock {
    /// Current wall-clock time in milliseconds.
    fn now_ms(&self) -> u64;
    fn request_frame(&self) -> FrameId;
    fn cancel_frame(&self, id: FrameId);
}

/// A [`FrameClock`] built from plain closures (e.g. `requestAnimationFrame`-style host hooks).
pub struct FnClock {
    now: Box<dyn Fn() -> u64>,
    request: Box<dyn Fn() -> FrameId>,
    cancel: Box<dyn Fn(FrameId)>,
}

impl FnClock {
    pub fn new(
        now: impl Fn() -> u64 + 'static,
        request: impl Fn() -> FrameId + 'static,
        cancel: impl Fn(FrameId) + 'static,
    ) -> Self {
        Self {
            now: Box::new(now),
            request: Box::new(request),
            cancel: Box::new(cancel),
        }
    }
}

impl FrameClock for FnClock {
    fn now_ms(&self) -> u64 {
        (self.now)()
    }

    fn request_frame(&self) -> FrameId {
        (self.request)()
    }

    fn cancel_frame(&self, id: FrameId) {
        (self.cancel)(id)
    }
}

impl fmt::Debug for FnClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnClock(..)")
    }
}

/// A manually driven [`FrameClock`] for tests and simulations.
///
/// Time only moves when [`FakeClock::advance`] is called. Requested frames queue up until the
/// host pops them with [`FakeClock::next_frame`]; cancelled frames are removed from the queue.
#[derive(Debug, Default)]
pub struct FakeClock {
    now: Cell<u64>,
    next_id: Cell<u64>,
    pending: RefCell<VecDeque<FrameId>>,
    requested: Cell<usize>,
    cancelled: Cell<usize>,
}

impl FakeClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now: Cell::new(now_ms),
            ..Self::default()
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set_now(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    /// Pops the oldest pending frame, if any.
    pub fn next_frame(&self) -> Option<FrameId> {
        self.pending.borrow_mut().pop_front()
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Total number of frames requested so far.
    pub fn requested_frames(&self) -> usize {
        self.requested.get()
    }

    /// Total number of cancel calls that removed a pending frame.
    pub fn cancelled_frames(&self) -> usize {
        self.cancelled.get()
    }

    /// Advances time by `frame_ms` and delivers frames to `deliver` until none are pending or
    /// `max_frames` were delivered. Returns the number of frames delivered.
    pub fn run_frames(
        &self,
        frame_ms: u64,
        max_frames: usize,
        mut deliver: impl FnMut(FrameId),
    ) -> usize {
        let mut delivered = 0usize;
        while delivered < max_frames {
            let Some(id) = self.next_frame() else {
                break;
            };
            self.advance(frame_ms);
            deliver(id);
            delivered += 1;
        }
        delivered
    }
}

impl FrameClock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn request_frame(&self) -> FrameId {
        let id = FrameId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        self.requested.set(self.requested.get() + 1);
        self.pending.borrow_mut().push_back(id);
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        let mut pending = self.pending.borrow_mut();
        if let Some(pos) = pending.iter().position(|p| *p == id) {
            pending.remove(pos);
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }
}
