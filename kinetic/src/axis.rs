use std::fmt;
use std::rc::Rc;

use crate::engine::{Kinetics, Line, Notice};
use crate::{
    AxisOptions, Bounds, Broadcast, Easing, FrameClock, FrameId, MomentumConfig, Motion,
    Observable, Phase,
};

/// Callback slot type for axis scroll notifications.
///
/// Handlers get a shared reference, so they can read state but cannot re-enter the domain.
pub type AxisHandler = Rc<dyn Fn(&dyn Axis)>;

/// A one-dimensional scrollable axis.
///
/// The offset is the negative scroll position: `start = -offset`, `end = start + size`.
pub trait Axis {
    fn offset_broadcast(&self) -> Broadcast<f64>;
    fn size_broadcast(&self) -> Broadcast<f64>;
    fn offset(&self) -> f64;
    fn size(&self) -> f64;
    fn velocity(&self) -> f64;
    fn phase(&self) -> Phase;
    fn bounds(&self) -> Bounds;
    fn is_disabled(&self) -> bool;
    /// Time of the last drag sample or animated frame; `None` until the first one.
    fn last_interaction_ms(&self) -> Option<u64>;

    fn start(&self) -> f64 {
        -self.offset()
    }

    fn end(&self) -> f64 {
        self.start() + self.size()
    }

    fn is_scrolling(&self) -> bool {
        self.phase().is_scrolling()
    }

    /// Animates from the current offset to `value` with the default duration.
    fn initialize(&mut self, value: f64);
    fn pointer_start(&mut self, value: f64);
    /// Returns `false` when the sample was throttled or no drag is active.
    fn pointer_move(&mut self, value: f64) -> bool;
    fn pointer_end(&mut self);
    /// Delivers a frame previously requested from the clock. Stale ids are ignored.
    fn frame(&mut self, id: FrameId) -> bool;
    fn reset(&mut self);
    fn stop(&mut self);
    fn set_size(&mut self, size: f64);
    fn disable(&mut self);
    fn enable(&mut self);
    /// Jumps to `value` immediately, cancelling any motion.
    fn scroll_to(&mut self, value: f64);
    fn animate_to(&mut self, value: f64, duration_ms: u64, easing: Easing);
}

/// Bounded axis kinematics: drag, momentum with exponential decay, elastic bounds and
/// programmatic animation, all driven by an injected [`FrameClock`].
///
/// Handlers run once the triggering call has finished, so they always read settled state.
pub struct AxisDomain {
    options: AxisOptions,
    line: Line,
    kinetics: Kinetics<f64>,
    size: Observable<f64>,
    on_scroll_start: Option<AxisHandler>,
    on_scroll: Option<AxisHandler>,
    on_scroll_end: Option<AxisHandler>,
}

impl AxisDomain {
    pub fn new(clock: Rc<dyn FrameClock>, options: AxisOptions) -> Self {
        let mut options = options;
        options.momentum = options.momentum.sanitized();
        let offset = options.initial_offset;
        kdebug!(
            min = options.min,
            max = options.max,
            offset,
            "AxisDomain::new"
        );

        Self {
            line: Line::new(options.bounds()),
            kinetics: Kinetics::new(clock, offset, options.momentum),
            options,
            size: Observable::new(0.0),
            on_scroll_start: None,
            on_scroll: None,
            on_scroll_end: None,
        }
    }

    pub fn options(&self) -> &AxisOptions {
        &self.options
    }

    /// Lower scroll-position bound (`-max_offset`).
    pub fn min(&self) -> f64 {
        -self.line.bounds.max
    }

    /// Upper scroll-position bound (`-min_offset`).
    pub fn max(&self) -> f64 {
        -self.line.bounds.min
    }

    pub fn min_offset(&self) -> f64 {
        self.line.bounds.min
    }

    pub fn max_offset(&self) -> f64 {
        self.line.bounds.max
    }

    /// Updates the scroll-position bounds. The current offset is left untouched; the next
    /// release or momentum frame pulls it back in if needed.
    ///
    /// Inverted bounds are swapped and a NaN side is unbounded.
    pub fn set_bounds(&mut self, min: f64, max: f64) {
        self.options.min = min;
        self.options.max = max;
        self.line.bounds = self.options.bounds();
        kdebug!(min, max, "AxisDomain::set_bounds");
    }

    pub fn set_momentum(&mut self, momentum: MomentumConfig) {
        self.options.momentum = momentum.sanitized();
        self.kinetics.set_momentum(momentum);
    }

    pub fn motion(&self) -> &Motion<f64> {
        self.kinetics.motion()
    }

    /// The frame this domain is waiting for, if any.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.kinetics.pending_frame()
    }

    pub fn set_on_scroll_start(&mut self, handler: Option<impl Fn(&dyn Axis) + 'static>) {
        self.on_scroll_start = handler.map(|f| Rc::new(f) as AxisHandler);
    }

    pub fn set_on_scroll(&mut self, handler: Option<impl Fn(&dyn Axis) + 'static>) {
        self.on_scroll = handler.map(|f| Rc::new(f) as AxisHandler);
    }

    pub fn set_on_scroll_end(&mut self, handler: Option<impl Fn(&dyn Axis) + 'static>) {
        self.on_scroll_end = handler.map(|f| Rc::new(f) as AxisHandler);
    }

    /// Runs the handlers for everything the last operation queued.
    fn flush(&mut self) {
        for notice in self.kinetics.take_notices() {
            let handler = match notice {
                Notice::Start => &self.on_scroll_start,
                Notice::Scroll => &self.on_scroll,
                Notice::End => &self.on_scroll_end,
            };
            if let Some(handler) = handler {
                handler(self as &dyn Axis);
            }
        }
    }

    /// Ends a drag. Returns `false` when no drag was active.
    pub(crate) fn release(&mut self) -> bool {
        self.kinetics.release()
    }

    /// Post-release decision: momentum, spring back into bounds, or settle where `rest` says.
    pub(crate) fn coast_or_settle(&mut self, rest: impl FnOnce(f64) -> Option<f64>) {
        self.kinetics.coast_or_settle(&self.line, rest);
        self.flush();
    }

    /// `target` must already be resolved against bounds and the disabled state.
    pub(crate) fn animate_with(&mut self, target: f64, duration_ms: u64, easing: Easing) {
        self.kinetics.animate_with(target, duration_ms, easing);
        self.flush();
    }

    pub(crate) fn frame_resting_at(
        &mut self,
        id: FrameId,
        rest: impl FnOnce(f64) -> Option<f64>,
    ) -> bool {
        let delivered = self.kinetics.frame(&self.line, id, rest);
        self.flush();
        delivered
    }
}

impl Axis for AxisDomain {
    fn offset_broadcast(&self) -> Broadcast<f64> {
        self.kinetics.offset_broadcast()
    }

    fn size_broadcast(&self) -> Broadcast<f64> {
        self.size.broadcast()
    }

    fn offset(&self) -> f64 {
        self.kinetics.offset()
    }

    fn size(&self) -> f64 {
        self.size.get()
    }

    fn velocity(&self) -> f64 {
        self.kinetics.velocity()
    }

    fn phase(&self) -> Phase {
        self.kinetics.phase()
    }

    fn bounds(&self) -> Bounds {
        self.line.bounds
    }

    fn is_disabled(&self) -> bool {
        self.line.disabled
    }

    fn last_interaction_ms(&self) -> Option<u64> {
        self.kinetics.last_interaction_ms()
    }

    fn initialize(&mut self, value: f64) {
        let duration_ms = self.options.momentum.animate_duration_ms;
        self.animate_to(value, duration_ms, Easing::default());
    }

    fn pointer_start(&mut self, value: f64) {
        self.kinetics.pointer_start(value);
        self.flush();
    }

    fn pointer_move(&mut self, value: f64) -> bool {
        let moved = self.kinetics.pointer_move(&self.line, value);
        self.flush();
        moved
    }

    fn pointer_end(&mut self) {
        if self.release() {
            self.coast_or_settle(|_| None);
        }
    }

    fn frame(&mut self, id: FrameId) -> bool {
        self.frame_resting_at(id, |_| None)
    }

    fn reset(&mut self) {
        self.kinetics.stop();
        self.flush();
    }

    fn stop(&mut self) {
        self.reset();
    }

    fn set_size(&mut self, size: f64) {
        self.size.set_if_changed(size.floor());
    }

    fn disable(&mut self) {
        self.line.disabled = true;
    }

    fn enable(&mut self) {
        self.line.disabled = false;
    }

    fn scroll_to(&mut self, value: f64) {
        self.kinetics.scroll_to(&self.line, value);
        self.flush();
    }

    fn animate_to(&mut self, value: f64, duration_ms: u64, easing: Easing) {
        self.kinetics
            .animate_to(&self.line, value, duration_ms, easing);
        self.flush();
    }
}

impl fmt::Debug for AxisDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisDomain")
            .field("offset", &self.offset())
            .field("size", &self.size())
            .field("velocity", &self.velocity())
            .field("phase", &self.phase())
            .field("bounds", &self.line.bounds)
            .field("disabled", &self.line.disabled)
            .field("pending_frame", &self.pending_frame())
            .finish_non_exhaustive()
    }
}
