use std::rc::Rc;

use crate::engine::REST_EPSILON;
use crate::kinematics::{round_to_interval, sanitize_interval, snap_target};
use crate::{Axis, AxisDomain, AxisOptions, Bounds, Broadcast, Easing, FrameClock, FrameId, Phase};

/// An [`AxisDomain`] whose resting offset is quantized to a fixed interval.
///
/// On release the remaining momentum travel is projected in closed form, rounded onto the
/// interval grid and animated to. Targets outside the bounds fall back to the plain momentum and
/// bounds-return behaviour.
#[derive(Debug)]
pub struct SnapAxisDomain {
    inner: AxisDomain,
    interval: f64,
}

impl SnapAxisDomain {
    pub fn new(clock: Rc<dyn FrameClock>, options: AxisOptions) -> Self {
        let interval = sanitize_interval(options.snap_interval);
        Self {
            inner: AxisDomain::new(clock, options),
            interval,
        }
    }

    pub fn snap_interval(&self) -> f64 {
        self.interval
    }

    /// Changes the interval, e.g. after content reflow. Takes effect on the next settle.
    pub fn set_snap_interval(&mut self, interval: f64) {
        self.interval = sanitize_interval(interval);
    }

    pub fn inner(&self) -> &AxisDomain {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut AxisDomain {
        &mut self.inner
    }

    pub fn set_bounds(&mut self, min: f64, max: f64) {
        self.inner.set_bounds(min, max);
    }

    pub fn set_on_scroll_start(&mut self, handler: Option<impl Fn(&dyn Axis) + 'static>) {
        self.inner.set_on_scroll_start(handler);
    }

    pub fn set_on_scroll(&mut self, handler: Option<impl Fn(&dyn Axis) + 'static>) {
        self.inner.set_on_scroll(handler);
    }

    pub fn set_on_scroll_end(&mut self, handler: Option<impl Fn(&dyn Axis) + 'static>) {
        self.inner.set_on_scroll_end(handler);
    }

    /// Where the axis would come to rest if released now.
    pub fn resting_target(&self) -> f64 {
        let decay = self.inner.options().momentum.decay;
        snap_target(self.offset(), self.velocity(), self.interval, decay)
    }

    fn settle(&mut self) {
        if self.interval <= 0.0 || self.inner.is_disabled() {
            return;
        }
        let offset = self.offset();
        let target = self.inner.bounds().clamp(round_to_interval(offset, self.interval));
        if (target - offset).abs() <= REST_EPSILON {
            return;
        }
        let duration_ms = self.inner.options().momentum.animate_duration_ms;
        self.inner.animate_with(target, duration_ms, Easing::EaseOutQuint);
    }
}

impl Axis for SnapAxisDomain {
    fn offset_broadcast(&self) -> Broadcast<f64> {
        self.inner.offset_broadcast()
    }

    fn size_broadcast(&self) -> Broadcast<f64> {
        self.inner.size_broadcast()
    }

    fn offset(&self) -> f64 {
        self.inner.offset()
    }

    fn size(&self) -> f64 {
        self.inner.size()
    }

    fn velocity(&self) -> f64 {
        self.inner.velocity()
    }

    fn phase(&self) -> Phase {
        self.inner.phase()
    }

    fn bounds(&self) -> Bounds {
        self.inner.bounds()
    }

    fn is_disabled(&self) -> bool {
        self.inner.is_disabled()
    }

    fn last_interaction_ms(&self) -> Option<u64> {
        self.inner.last_interaction_ms()
    }

    fn initialize(&mut self, value: f64) {
        self.inner.initialize(value);
    }

    fn pointer_start(&mut self, value: f64) {
        self.inner.pointer_start(value);
    }

    fn pointer_move(&mut self, value: f64) -> bool {
        self.inner.pointer_move(value)
    }

    fn pointer_end(&mut self) {
        if !self.inner.release() {
            return;
        }
        if self.interval <= 0.0 || self.inner.is_disabled() {
            self.inner.coast_or_settle(|_| None);
            return;
        }

        let target = self.resting_target();
        if !self.inner.bounds().contains(target) {
            ktrace!(target, "snap target out of bounds");
            let interval = self.interval;
            self.inner
                .coast_or_settle(move |offset| Some(round_to_interval(offset, interval)));
            return;
        }
        if (target - self.offset()).abs() <= REST_EPSILON {
            self.inner.stop();
            return;
        }
        let duration_ms = self.inner.options().momentum.animate_duration_ms;
        self.inner.animate_with(target, duration_ms, Easing::EaseOutQuint);
    }

    fn frame(&mut self, id: FrameId) -> bool {
        let interval = self.interval;
        self.inner.frame_resting_at(id, move |offset| {
            (interval > 0.0).then(|| round_to_interval(offset, interval))
        })
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn stop(&mut self) {
        self.inner.stop();
        self.settle();
    }

    fn set_size(&mut self, size: f64) {
        self.inner.set_size(size);
    }

    fn disable(&mut self) {
        self.inner.disable();
    }

    fn enable(&mut self) {
        self.inner.enable();
    }

    fn scroll_to(&mut self, value: f64) {
        self.inner.scroll_to(value);
    }

    fn animate_to(&mut self, value: f64, duration_ms: u64, easing: Easing) {
        self.inner.animate_to(value, duration_ms, easing);
    }
}
