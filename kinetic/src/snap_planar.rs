use std::rc::Rc;

use crate::engine::REST_EPSILON;
use crate::kinematics::{round_to_interval, sanitize_interval, snap_target};
use crate::{
    Bounds, Broadcast, Easing, FrameClock, FrameId, Phase, Position, ScrollDomain, ScrollOptions,
    Scrollable, Size, Vector,
};

/// A [`ScrollDomain`] that comes to rest on a square grid (one interval for both axes).
#[derive(Debug)]
pub struct SnapScrollDomain {
    inner: ScrollDomain,
    interval: f64,
}

fn round_position(p: Position, interval: f64) -> Position {
    Position::new(
        round_to_interval(p.x, interval),
        round_to_interval(p.y, interval),
    )
}

impl SnapScrollDomain {
    pub fn new(clock: Rc<dyn FrameClock>, options: ScrollOptions) -> Self {
        let interval = sanitize_interval(options.snap_interval);
        Self {
            inner: ScrollDomain::new(clock, options),
            interval,
        }
    }

    pub fn snap_interval(&self) -> f64 {
        self.interval
    }

    pub fn set_snap_interval(&mut self, interval: f64) {
        self.interval = sanitize_interval(interval);
    }

    pub fn inner(&self) -> &ScrollDomain {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut ScrollDomain {
        &mut self.inner
    }

    pub fn set_bounds(&mut self, min: Position, max: Position) {
        self.inner.set_bounds(min, max);
    }

    pub fn set_on_scroll_start(&mut self, handler: Option<impl Fn(&dyn Scrollable) + 'static>) {
        self.inner.set_on_scroll_start(handler);
    }

    pub fn set_on_scroll(&mut self, handler: Option<impl Fn(&dyn Scrollable) + 'static>) {
        self.inner.set_on_scroll(handler);
    }

    pub fn set_on_scroll_end(&mut self, handler: Option<impl Fn(&dyn Scrollable) + 'static>) {
        self.inner.set_on_scroll_end(handler);
    }

    /// Where the surface would come to rest if released now (disabled axes stay put).
    pub fn resting_target(&self) -> Position {
        let decay = self.inner.options().momentum.decay;
        let offset = self.offset();
        let velocity = self.velocity();
        let x = if self.is_x_disabled() {
            offset.x
        } else {
            snap_target(offset.x, velocity.x, self.interval, decay)
        };
        let y = if self.is_y_disabled() {
            offset.y
        } else {
            snap_target(offset.y, velocity.y, self.interval, decay)
        };
        Position::new(x, y)
    }

    fn settle(&mut self) {
        if self.interval <= 0.0 {
            return;
        }
        let offset = self.offset();
        let target = self
            .inner
            .resolve_target(round_position(offset, self.interval));
        if (target - offset).magnitude() <= REST_EPSILON {
            return;
        }
        let duration_ms = self.inner.options().momentum.animate_duration_ms;
        self.inner
            .animate_with(target, duration_ms, Easing::EaseOutQuint);
    }
}

impl Scrollable for SnapScrollDomain {
    fn offset_broadcast(&self) -> Broadcast<Position> {
        self.inner.offset_broadcast()
    }

    fn size_broadcast(&self) -> Broadcast<Size> {
        self.inner.size_broadcast()
    }

    fn offset(&self) -> Position {
        self.inner.offset()
    }

    fn size(&self) -> Size {
        self.inner.size()
    }

    fn velocity(&self) -> Position {
        self.inner.velocity()
    }

    fn phase(&self) -> Phase {
        self.inner.phase()
    }

    fn bounds_x(&self) -> Bounds {
        self.inner.bounds_x()
    }

    fn bounds_y(&self) -> Bounds {
        self.inner.bounds_y()
    }

    fn is_x_disabled(&self) -> bool {
        self.inner.is_x_disabled()
    }

    fn is_y_disabled(&self) -> bool {
        self.inner.is_y_disabled()
    }

    fn last_interaction_ms(&self) -> Option<u64> {
        self.inner.last_interaction_ms()
    }

    fn initialize(&mut self, x: f64, y: f64) {
        self.inner.initialize(x, y);
    }

    fn pointer_start(&mut self, x: f64, y: f64) {
        self.inner.pointer_start(x, y);
    }

    fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_move(x, y)
    }

    fn pointer_end(&mut self) {
        if !self.inner.release() {
            return;
        }
        if self.interval <= 0.0 {
            self.inner.coast_or_settle(|_| None);
            return;
        }

        let target = self.resting_target();
        if !self.inner.in_bounds(target) {
            ktrace!(?target, "snap target out of bounds");
            let interval = self.interval;
            self.inner
                .coast_or_settle(move |offset| Some(round_position(offset, interval)));
            return;
        }
        let offset = self.offset();
        if (target - offset).magnitude() <= REST_EPSILON {
            self.inner.stop();
            return;
        }
        let duration_ms = self.inner.options().momentum.animate_duration_ms;
        self.inner
            .animate_with(target, duration_ms, Easing::EaseOutQuint);
    }

    fn frame(&mut self, id: FrameId) -> bool {
        let interval = self.interval;
        self.inner.frame_resting_at(id, move |offset| {
            (interval > 0.0).then(|| round_position(offset, interval))
        })
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn stop(&mut self) {
        self.inner.stop();
        self.settle();
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.inner.set_size(width, height);
    }

    fn disable_x(&mut self) {
        self.inner.disable_x();
    }

    fn disable_y(&mut self) {
        self.inner.disable_y();
    }

    fn enable_x(&mut self) {
        self.inner.enable_x();
    }

    fn enable_y(&mut self) {
        self.inner.enable_y();
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        self.inner.scroll_to(x, y);
    }

    fn animate_to(&mut self, x: f64, y: f64, duration_ms: u64, easing: Easing) {
        self.inner.animate_to(x, y, duration_ms, easing);
    }
}
