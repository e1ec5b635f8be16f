use crate::kinematics::FRAME_MS;
use crate::{Easing, Vector};

/// A single eased transition between two values.
///
/// `carry` is the per-frame velocity the value had when the tween started. It is added as a
/// term that starts with exactly that slope and fades out by the end, so retargeting an object
/// that is already moving does not produce a visible kink.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween<V> {
    pub from: V,
    pub to: V,
    pub carry: V,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl<V: Vector> Tween<V> {
    pub fn new(from: V, to: V, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            carry: V::default(),
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn with_carry(mut self, carry: V) -> Self {
        self.carry = carry;
        self
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn progress(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_ms: u64) -> V {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        let eased = self.easing.sample(t);
        // d/dframe of frames * t * (1 - t)^2 is 1 at t = 0 and the term is 0 at both ends.
        let frames = self.duration_ms as f64 / FRAME_MS as f64;
        let inv = 1.0 - t;
        let carry = self.carry * (frames * t * inv * inv);
        self.from + (self.to - self.from) * eased + carry
    }

    /// Restarts the tween from its current sampled value towards `new_to`.
    pub fn retarget(&mut self, now_ms: u64, new_to: V, duration_ms: u64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms, self.easing);
    }
}

/// One sampled step of a [`Motion`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionFrame<V> {
    pub value: V,
    /// `true` on the final frame; the motion is idle afterwards.
    pub done: bool,
}

/// A tiny motion engine: one in-flight tween plus the state needed to retarget it smoothly.
///
/// Typical use:
/// - `inject(prev, current)` to describe where the value is and how fast it moves right now
/// - `segue_to(target, ..)` to start easing towards `target` from that state
/// - `tick(now_ms)` every animation frame until it reports `done`
#[derive(Clone, Debug, Default)]
pub struct Motion<V> {
    current: V,
    velocity: V,
    tween: Option<Tween<V>>,
}

impl<V: Vector> Motion<V> {
    pub fn new(current: V) -> Self {
        Self {
            current,
            velocity: V::default(),
            tween: None,
        }
    }

    pub fn current(&self) -> V {
        self.current
    }

    /// Per-frame velocity of the last sampled step (or the injected one).
    pub fn velocity(&self) -> V {
        self.velocity
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn tween(&self) -> Option<&Tween<V>> {
        self.tween.as_ref()
    }

    pub fn target(&self) -> Option<V> {
        self.tween.map(|t| t.to)
    }

    /// Replaces the in-flight state with a synthetic one that was at `from` one frame ago and is
    /// at `to` now. Any running tween is dropped.
    pub fn inject(&mut self, from: V, to: V) -> &mut Self {
        self.tween = None;
        self.current = to;
        self.velocity = to - from;
        self
    }

    /// Starts easing from the current state to `target`, carrying the current velocity.
    pub fn segue_to(&mut self, target: V, now_ms: u64, duration_ms: u64, easing: Easing) {
        let tween =
            Tween::new(self.current, target, now_ms, duration_ms, easing).with_carry(self.velocity);
        self.tween = Some(tween);
    }

    /// Freezes the motion at its current value.
    pub fn stop(&mut self) {
        self.tween = None;
        self.velocity = V::default();
    }

    /// Samples the tween at `now_ms`. Returns `None` when nothing is animating.
    pub fn tick(&mut self, now_ms: u64) -> Option<MotionFrame<V>> {
        let tween = self.tween?;
        let value = tween.sample(now_ms);
        self.velocity = value - self.current;
        self.current = value;

        let done = tween.is_done(now_ms);
        if done {
            self.tween = None;
            self.velocity = V::default();
        }
        Some(MotionFrame { value, done })
    }
}
