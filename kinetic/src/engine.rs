//! The drag/momentum/animation state machine every scroll domain runs on.
//!
//! [`Kinetics`] owns the offset, motion, velocity estimator, phase and the pending frame. What
//! differs between a line and a plane (bounds, disabled components, the elastic hand-off) is
//! supplied per call through an [`Extent`].
//!
//! The engine never calls user handlers itself. It queues [`Notice`]s, and the owning domain
//! drains them once the operation has finished so handlers observe the final state.

use std::rc::Rc;

use crate::kinematics::{Spring, projected_travel, spring_into_bounds};
use crate::{
    Bounds, Broadcast, Easing, FrameClock, FrameId, MomentumConfig, Motion, Observable, Phase,
    Position, VelocityEstimator, Vector,
};

/// Offsets closer than this are considered equal when deciding whether a settle needs to move.
pub(crate) const REST_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    Start,
    Scroll,
    End,
}

/// Bounds and disabled components of a domain's offset.
pub(crate) trait Extent<V: Vector> {
    /// Whether every enabled component lies within its bounds.
    fn contains(&self, offset: V) -> bool;
    /// Clamps enabled components; disabled ones pass through unchanged.
    fn clamp(&self, target: V) -> V;
    /// `next` for enabled components, `prev` for disabled ones.
    fn hold(&self, prev: V, next: V) -> V;
    /// No component may move.
    fn frozen(&self) -> bool;
    /// Elastic check for one momentum frame with the already-decayed `velocity`.
    fn spring(&self, offset: V, velocity: V, config: &MomentumConfig) -> Spring<V>;
}

/// A single bounded axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Line {
    pub bounds: Bounds,
    pub disabled: bool,
}

impl Line {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            disabled: false,
        }
    }
}

impl Extent<f64> for Line {
    fn contains(&self, offset: f64) -> bool {
        self.disabled || self.bounds.contains(offset)
    }

    fn clamp(&self, target: f64) -> f64 {
        if self.disabled {
            target
        } else {
            self.bounds.clamp(target)
        }
    }

    fn hold(&self, prev: f64, next: f64) -> f64 {
        if self.disabled { prev } else { next }
    }

    fn frozen(&self) -> bool {
        self.disabled
    }

    fn spring(&self, offset: f64, velocity: f64, config: &MomentumConfig) -> Spring {
        if self.disabled {
            Spring::Coast(velocity)
        } else {
            spring_into_bounds(offset, velocity, self.bounds, config)
        }
    }
}

/// Two independent axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Plane {
    pub x: Line,
    pub y: Line,
}

impl Extent<Position> for Plane {
    fn contains(&self, offset: Position) -> bool {
        self.x.contains(offset.x) && self.y.contains(offset.y)
    }

    fn clamp(&self, target: Position) -> Position {
        Position::new(self.x.clamp(target.x), self.y.clamp(target.y))
    }

    fn hold(&self, prev: Position, next: Position) -> Position {
        Position::new(self.x.hold(prev.x, next.x), self.y.hold(prev.y, next.y))
    }

    fn frozen(&self) -> bool {
        self.x.frozen() && self.y.frozen()
    }

    fn spring(
        &self,
        offset: Position,
        velocity: Position,
        config: &MomentumConfig,
    ) -> Spring<Position> {
        let spring_x = self.x.spring(offset.x, velocity.x, config);
        let spring_y = self.y.spring(offset.y, velocity.y, config);
        match (spring_x, spring_y) {
            (Spring::Coast(vx), Spring::Coast(vy)) => Spring::Coast(Position::new(vx, vy)),
            (sx, sy) => {
                // One axis is returning to a bound; the other glides to where its remaining
                // momentum would have taken it.
                let resting = |spring: Spring, offset: f64| match spring {
                    Spring::Return(bound) => bound,
                    Spring::Coast(v) => offset + projected_travel(v, config.decay),
                };
                Spring::Return(Position::new(
                    resting(sx, offset.x),
                    resting(sy, offset.y),
                ))
            }
        }
    }
}

pub(crate) struct Kinetics<V: Vector> {
    clock: Rc<dyn FrameClock>,
    momentum: MomentumConfig,
    offset: Observable<V>,
    motion: Motion<V>,
    estimator: VelocityEstimator<V>,
    phase: Phase,
    pending_frame: Option<FrameId>,
    last_interaction_ms: Option<u64>,
    notices: Vec<Notice>,
}

impl<V: Vector> Kinetics<V> {
    pub fn new(clock: Rc<dyn FrameClock>, offset: V, momentum: MomentumConfig) -> Self {
        let mut estimator = VelocityEstimator::new();
        estimator.reset(offset, clock.now_ms());
        Self {
            clock,
            momentum: momentum.sanitized(),
            offset: Observable::new(offset),
            motion: Motion::new(offset),
            estimator,
            phase: Phase::Idle,
            pending_frame: None,
            last_interaction_ms: None,
            notices: Vec::new(),
        }
    }

    pub fn set_momentum(&mut self, momentum: MomentumConfig) {
        self.momentum = momentum.sanitized();
    }

    pub fn offset(&self) -> V {
        self.offset.get()
    }

    pub fn offset_broadcast(&self) -> Broadcast<V> {
        self.offset.broadcast()
    }

    pub fn velocity(&self) -> V {
        self.estimator.velocity()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn motion(&self) -> &Motion<V> {
        &self.motion
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending_frame
    }

    pub fn last_interaction_ms(&self) -> Option<u64> {
        self.last_interaction_ms
    }

    /// Drains the notices queued since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Switches phase and queues the edge-triggered start/end notices.
    fn enter(&mut self, phase: Phase) {
        let was_scrolling = self.phase.is_scrolling();
        self.phase = phase;
        if !was_scrolling && phase.is_scrolling() {
            self.notices.push(Notice::Start);
        } else if was_scrolling && !phase.is_scrolling() {
            self.notices.push(Notice::End);
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.clock.cancel_frame(id);
        }
    }

    fn schedule_frame(&mut self) {
        self.cancel_frame();
        self.pending_frame = Some(self.clock.request_frame());
    }

    /// Moves the offset by `delta` on every enabled component.
    fn shift(&mut self, extent: &impl Extent<V>, offset: V, delta: V) {
        if !extent.frozen() {
            self.offset.set(extent.hold(offset, offset + delta));
        }
    }

    /// A requested offset as the domain would accept it: disabled components stay where they
    /// are, enabled ones are clamped.
    pub fn resolve(&self, extent: &impl Extent<V>, target: V) -> V {
        extent.hold(self.offset(), extent.clamp(target))
    }

    pub fn pointer_start(&mut self, position: V) {
        let now = self.clock.now_ms();
        ktrace!(?position, now, "pointer_start");
        self.cancel_frame();
        self.motion.stop();
        self.estimator.reset(position, now);
        self.last_interaction_ms = Some(now);
        self.enter(Phase::Dragging);
    }

    pub fn pointer_move(&mut self, extent: &impl Extent<V>, position: V) -> bool {
        if self.phase != Phase::Dragging {
            return false;
        }
        let now = self.clock.now_ms();
        if !self.estimator.sample(position, now) {
            return false;
        }
        self.last_interaction_ms = Some(now);

        let offset = self.offset();
        let delta = self.estimator.velocity();
        self.shift(extent, offset, delta);
        self.notices.push(Notice::Scroll);
        true
    }

    /// Ends a drag. Returns `false` when no drag was active.
    pub fn release(&mut self) -> bool {
        if self.phase != Phase::Dragging {
            ktrace!(phase = ?self.phase, "pointer_end without an active drag");
            return false;
        }
        let now = self.clock.now_ms();
        self.estimator.touch(now);
        self.last_interaction_ms = Some(now);
        true
    }

    /// Post-release decision: momentum, spring back into bounds, or settle. Wherever the
    /// domain comes to rest without momentum, `rest` may name a resting offset instead.
    pub fn coast_or_settle(
        &mut self,
        extent: &impl Extent<V>,
        rest: impl FnOnce(V) -> Option<V>,
    ) {
        let velocity = self.velocity();
        let offset = self.offset();

        if velocity.magnitude() > self.momentum.release_velocity {
            ktrace!(?velocity, ?offset, "momentum start");
            self.enter(Phase::Momentum);
            self.schedule_frame();
        } else if !extent.contains(offset) {
            let target = self.resolve(extent, rest(offset).unwrap_or(offset));
            ktrace!(?offset, ?target, "spring back into bounds");
            self.animate_with(target, self.momentum.bounds_duration_ms, Easing::Bounds);
        } else {
            self.rest_or_stop(extent, offset, rest);
        }
    }

    fn rest_or_stop(
        &mut self,
        extent: &impl Extent<V>,
        offset: V,
        rest: impl FnOnce(V) -> Option<V>,
    ) {
        match rest(offset).map(|target| self.resolve(extent, target)) {
            Some(target) if (target - offset).magnitude() > REST_EPSILON => {
                let duration_ms = self.momentum.animate_duration_ms;
                self.animate_with(target, duration_ms, Easing::EaseOutQuint);
            }
            _ => {
                ktrace!(?offset, "settled");
                self.stop();
            }
        }
    }

    /// Starts a motion to `target` (already resolved against the extent), keeping the current
    /// velocity so there is no visible jump.
    pub fn animate_with(&mut self, target: V, duration_ms: u64, easing: Easing) {
        let offset = self.offset();
        let velocity = self.velocity();
        let now = self.clock.now_ms();
        ktrace!(?offset, ?target, duration_ms, "animate");

        self.cancel_frame();
        self.motion.inject(offset - velocity, offset);
        self.motion.segue_to(target, now, duration_ms, easing);
        self.enter(Phase::Animating);
        self.schedule_frame();
    }

    pub fn animate_to(
        &mut self,
        extent: &impl Extent<V>,
        target: V,
        duration_ms: u64,
        easing: Easing,
    ) {
        if !target.is_finite() {
            kwarn!(?target, "non-finite animation target ignored");
            return;
        }
        let target = self.resolve(extent, target);
        self.animate_with(target, duration_ms, easing);
    }

    /// Jumps to `target` immediately. Disabled components take the raw value.
    pub fn scroll_to(&mut self, extent: &impl Extent<V>, target: V) {
        if !target.is_finite() {
            kwarn!(?target, "non-finite scroll target ignored");
            return;
        }
        self.stop();
        let target = extent.clamp(target);
        self.motion.inject(target, target);
        self.offset.set(target);
    }

    /// Delivers a frame; when momentum comes to rest, `rest` may name a resting offset to
    /// animate to instead of stopping in place.
    pub fn frame(
        &mut self,
        extent: &impl Extent<V>,
        id: FrameId,
        rest: impl FnOnce(V) -> Option<V>,
    ) -> bool {
        if self.pending_frame != Some(id) {
            ktrace!(?id, pending = ?self.pending_frame, "stale frame ignored");
            return false;
        }
        self.pending_frame = None;

        match self.phase {
            Phase::Momentum => self.momentum_tick(extent, rest),
            Phase::Animating => self.animation_tick(extent),
            Phase::Idle | Phase::Dragging => {}
        }
        true
    }

    fn momentum_tick(&mut self, extent: &impl Extent<V>, rest: impl FnOnce(V) -> Option<V>) {
        let config = self.momentum;
        let offset = self.offset();
        let decayed = self.velocity() * config.decay;

        match extent.spring(offset, decayed, &config) {
            Spring::Return(glide) => {
                let target = self.resolve(extent, rest(glide).unwrap_or(glide));
                ktrace!(?offset, ?target, "momentum handed off to bounds return");
                self.estimator.fill(decayed);
                self.animate_with(target, config.bounds_duration_ms, Easing::Bounds);
            }
            Spring::Coast(velocity) => {
                self.estimator.fill(velocity);
                if velocity.magnitude() > config.stop_velocity || !extent.contains(offset) {
                    self.shift(extent, offset, velocity);
                    self.last_interaction_ms = Some(self.clock.now_ms());
                    self.notices.push(Notice::Scroll);
                    self.schedule_frame();
                } else {
                    self.rest_or_stop(extent, offset, rest);
                }
            }
        }
    }

    fn animation_tick(&mut self, extent: &impl Extent<V>) {
        let now = self.clock.now_ms();
        let Some(frame) = self.motion.tick(now) else {
            self.stop();
            return;
        };

        let prev = self.offset();
        let value = extent.hold(prev, frame.value);
        self.estimator.fill(value - prev);
        self.offset.set(value);
        self.last_interaction_ms = Some(now);
        self.notices.push(Notice::Scroll);

        if frame.done {
            ktrace!(offset = ?value, "animation finished");
            self.stop();
        } else {
            self.schedule_frame();
        }
    }

    /// Cancels any frame and motion and goes idle at the current offset.
    pub fn stop(&mut self) {
        self.cancel_frame();
        self.motion.stop();
        let now = self.clock.now_ms();
        let offset = self.offset();
        self.estimator.reset(offset, now);
        self.enter(Phase::Idle);
    }
}
