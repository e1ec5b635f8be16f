use crate::Vector;
use crate::kinematics::{FRAME_MS, HISTORY_LEN};

/// Smooths raw pointer deltas into a stable per-frame velocity.
///
/// Samples closer than one frame apart are ignored. Accepted deltas are normalized by the number
/// of whole frames that elapsed (so slow and fast devices report comparable speeds) and the
/// velocity is the mean of the last three.
#[derive(Clone, Debug)]
pub struct VelocityEstimator<V> {
    history: [V; HISTORY_LEN],
    velocity: V,
    last_position: V,
    last_time_ms: u64,
}

impl<V: Vector> Default for VelocityEstimator<V> {
    fn default() -> Self {
        Self {
            history: [V::default(); HISTORY_LEN],
            velocity: V::default(),
            last_position: V::default(),
            last_time_ms: 0,
        }
    }
}

impl<V: Vector> VelocityEstimator<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-anchors at `position`/`now_ms` and zero-fills the history.
    pub fn reset(&mut self, position: V, now_ms: u64) {
        self.history = [V::default(); HISTORY_LEN];
        self.velocity = V::default();
        self.last_position = position;
        self.last_time_ms = now_ms;
    }

    /// Moves the time anchor without touching position or history.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_time_ms = now_ms;
    }

    /// Feeds a raw pointer position. Returns `false` (and changes nothing) when throttled.
    pub fn sample(&mut self, position: V, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_time_ms);
        if elapsed < FRAME_MS {
            return false;
        }
        let frames = (elapsed / FRAME_MS) as f64;
        let delta = (position - self.last_position) / frames;

        self.last_time_ms = now_ms;
        self.last_position = position;
        self.push(delta);
        true
    }

    fn push(&mut self, delta: V) {
        self.history.rotate_left(1);
        self.history[HISTORY_LEN - 1] = delta;

        let total = self
            .history
            .iter()
            .fold(V::default(), |acc, &d| acc + d);
        self.velocity = total / HISTORY_LEN as f64;
    }

    /// Overwrites every history slot (and the velocity) with `velocity`.
    ///
    /// Used while momentum or an animation owns the motion, so a later grab starts from the
    /// motion's actual speed.
    pub fn fill(&mut self, velocity: V) {
        self.history = [velocity; HISTORY_LEN];
        self.velocity = velocity;
    }

    pub fn velocity(&self) -> V {
        self.velocity
    }

    pub fn history(&self) -> &[V; HISTORY_LEN] {
        &self.history
    }

    pub fn last_position(&self) -> V {
        self.last_position
    }

    pub fn last_time_ms(&self) -> u64 {
        self.last_time_ms
    }
}
