use crate::kinematics::sanitize_interval;
use crate::{Bounds, Position};

/// Tuning for momentum, elastic bounds and animations.
///
/// Velocities are in units per frame (16ms). The defaults reproduce the feel of the reference
/// touch scroller: 3% friction per frame, a 200 unit elastic zone, and an 800ms spring-back.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentumConfig {
    /// Velocity multiplier applied on every momentum frame.
    pub decay: f64,
    /// Minimum release speed that starts momentum.
    pub release_velocity: f64,
    /// Momentum stops once speed falls to this value (unless out of bounds).
    pub stop_velocity: f64,
    /// Out-of-bounds momentum keeps coasting only while it pushes outward at least this fast.
    pub spring_velocity: f64,
    /// Overshoot at which outward velocity is fully damped.
    pub elastic_distance: f64,
    pub bounds_duration_ms: u64,
    /// Default duration for `animate_to`/snap animations.
    pub animate_duration_ms: u64,
}

impl MomentumConfig {
    /// Tuning for a single axis.
    pub fn axis() -> Self {
        Self {
            decay: 0.97,
            release_velocity: 3.0,
            stop_velocity: 0.1,
            spring_velocity: 0.9,
            elastic_distance: 200.0,
            bounds_duration_ms: 800,
            animate_duration_ms: 2000,
        }
    }

    /// Tuning for a planar surface; release speed is measured on the velocity vector.
    pub fn planar() -> Self {
        Self {
            release_velocity: 6.0,
            ..Self::axis()
        }
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_release_velocity(mut self, release_velocity: f64) -> Self {
        self.release_velocity = release_velocity;
        self
    }

    pub fn with_stop_velocity(mut self, stop_velocity: f64) -> Self {
        self.stop_velocity = stop_velocity;
        self
    }

    pub fn with_elastic_distance(mut self, elastic_distance: f64) -> Self {
        self.elastic_distance = elastic_distance;
        self
    }

    pub fn with_bounds_duration_ms(mut self, duration_ms: u64) -> Self {
        self.bounds_duration_ms = duration_ms;
        self
    }

    pub fn with_animate_duration_ms(mut self, duration_ms: u64) -> Self {
        self.animate_duration_ms = duration_ms;
        self
    }

    /// Clamps values that would make the simulation diverge or divide by zero.
    pub(crate) fn sanitized(mut self) -> Self {
        if !(0.0..1.0).contains(&self.decay) {
            kwarn!(decay = self.decay, "decay clamped into [0, 1)");
            self.decay = if self.decay.is_nan() {
                0.0
            } else {
                self.decay.clamp(0.0, 0.999)
            };
        }
        self.release_velocity = self.release_velocity.max(0.0);
        self.stop_velocity = self.stop_velocity.max(0.0);
        self.spring_velocity = self.spring_velocity.max(0.0);
        if !(self.elastic_distance > 0.0) {
            self.elastic_distance = 1.0;
        }
        self.bounds_duration_ms = self.bounds_duration_ms.max(1);
        self.animate_duration_ms = self.animate_duration_ms.max(1);
        self
    }
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self::axis()
    }
}

/// Configuration for [`crate::AxisDomain`] and [`crate::SnapAxisDomain`].
///
/// Bounds are given as scroll *positions* (`start`), which is what applications usually think
/// in; the domain enforces them on the offset as `[-max, -min]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisOptions {
    pub min: f64,
    pub max: f64,
    /// Only used by snapping domains.
    pub snap_interval: f64,
    pub momentum: MomentumConfig,
    pub initial_offset: f64,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            snap_interval: 0.0,
            momentum: MomentumConfig::axis(),
            initial_offset: 0.0,
        }
    }
}

impl AxisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_snap_interval(mut self, interval: f64) -> Self {
        self.snap_interval = sanitize_interval(interval);
        self
    }

    pub fn with_momentum(mut self, momentum: MomentumConfig) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_initial_offset(mut self, offset: f64) -> Self {
        self.initial_offset = offset;
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_positions(self.min, self.max)
    }
}

/// Configuration for [`crate::ScrollDomain`] and [`crate::SnapScrollDomain`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOptions {
    pub min: Position,
    pub max: Position,
    /// Shared by both axes; only used by snapping domains.
    pub snap_interval: f64,
    pub momentum: MomentumConfig,
    pub initial_offset: Position,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            min: Position::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            max: Position::new(f64::INFINITY, f64::INFINITY),
            snap_interval: 0.0,
            momentum: MomentumConfig::planar(),
            initial_offset: Position::ZERO,
        }
    }
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(mut self, min: Position, max: Position) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_snap_interval(mut self, interval: f64) -> Self {
        self.snap_interval = sanitize_interval(interval);
        self
    }

    pub fn with_momentum(mut self, momentum: MomentumConfig) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_initial_offset(mut self, offset: Position) -> Self {
        self.initial_offset = offset;
        self
    }

    pub fn bounds_x(&self) -> Bounds {
        Bounds::from_positions(self.min.x, self.max.x)
    }

    pub fn bounds_y(&self) -> Bounds {
        Bounds::from_positions(self.min.y, self.max.y)
    }
}
