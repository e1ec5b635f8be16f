//! Kinematic math shared by every scroll domain.
//!
//! All functions work in *offset space*: the offset is the negative scroll position, so content
//! is translated by the offset and one additive update serves both dragging and momentum.

use crate::MomentumConfig;

/// Length of one animation frame. Pointer samples are throttled to this and momentum decays
/// once per frame.
pub const FRAME_MS: u64 = 16;

/// Number of smoothed deltas averaged into a velocity.
pub const HISTORY_LEN: usize = 3;

/// Inclusive offset interval an enabled axis is kept within.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const UNBOUNDED: Self = Self {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Converts scroll-position bounds into offset bounds (`[-max, -min]`).
    ///
    /// A NaN side is treated as unbounded and an inverted pair is swapped, so the result always
    /// satisfies `min <= max`.
    pub fn from_positions(min: f64, max: f64) -> Self {
        let (mut min, mut max) = (min, max);
        if min.is_nan() {
            kwarn!("NaN minimum scroll position treated as unbounded");
            min = f64::NEG_INFINITY;
        }
        if max.is_nan() {
            kwarn!("NaN maximum scroll position treated as unbounded");
            max = f64::INFINITY;
        }
        if min > max {
            kwarn!(min, max, "inverted scroll bounds swapped");
            std::mem::swap(&mut min, &mut max);
        }
        Self {
            min: -max,
            max: -min,
        }
    }

    pub fn clamp(&self, offset: f64) -> f64 {
        offset.max(self.min).min(self.max)
    }

    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.min && offset <= self.max
    }

    /// Distance outside the interval (0 when inside).
    pub fn overshoot(&self, offset: f64) -> f64 {
        if offset > self.max {
            offset - self.max
        } else if offset < self.min {
            self.min - offset
        } else {
            0.0
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Result of the elastic check run on each momentum frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Spring<V = f64> {
    /// Keep coasting with this (possibly damped) velocity.
    Coast(V),
    /// Abort momentum and animate back to this offset.
    Return(V),
}

/// Damps velocity that keeps pushing past a bound, or hands off to a bounds-return animation
/// once the push is spent or reverses.
pub fn spring_into_bounds(
    offset: f64,
    velocity: f64,
    bounds: Bounds,
    config: &MomentumConfig,
) -> Spring {
    if offset > bounds.max {
        if velocity >= config.spring_velocity {
            let damping = 1.0 - (offset - bounds.max) / config.elastic_distance;
            Spring::Coast(velocity * damping.max(0.0))
        } else {
            Spring::Return(bounds.max)
        }
    } else if offset < bounds.min {
        if velocity <= -config.spring_velocity {
            let damping = 1.0 - (bounds.min - offset) / config.elastic_distance;
            Spring::Coast(velocity * damping.max(0.0))
        } else {
            Spring::Return(bounds.min)
        }
    } else {
        Spring::Coast(velocity)
    }
}

/// Total distance a velocity travels under per-frame `decay` (closed form of the geometric
/// series `v + v*d + v*d^2 + ...`).
pub fn projected_travel(velocity: f64, decay: f64) -> f64 {
    velocity / (1.0 - decay)
}

/// Rounds `value` to the nearest multiple of `interval`.
///
/// Exactly-half remainders round away from zero. A non-positive interval disables rounding.
pub fn round_to_interval(value: f64, interval: f64) -> f64 {
    if !(interval > 0.0) || !value.is_finite() {
        return value;
    }
    let half = interval / 2.0;
    let remainder = (value % interval).abs();
    let direction = value.signum();

    if remainder >= half {
        value + direction * (interval - remainder)
    } else {
        value - direction * remainder
    }
}

/// Where a snapping axis released at `offset` with `velocity` should come to rest.
///
/// The remaining momentum travel is estimated in whole intervals, added to the offset, and the
/// result is rounded onto the interval grid.
pub fn snap_target(offset: f64, velocity: f64, interval: f64, decay: f64) -> f64 {
    if !(interval > 0.0) {
        return offset;
    }
    let steps = (projected_travel(velocity, decay) / interval).round();
    round_to_interval(offset + steps * interval, interval)
}

/// Sanitizes a user-provided snap interval: negative or NaN becomes `0` (snapping off).
pub(crate) fn sanitize_interval(interval: f64) -> f64 {
    if interval > 0.0 {
        interval
    } else {
        if interval < 0.0 || interval.is_nan() {
            kwarn!(interval, "negative snap interval clamped to 0");
        }
        0.0
    }
}
