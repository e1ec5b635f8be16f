use core::ops::{Add, Div, Mul, Sub};

/// A 2-D point/vector in the scroll plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Position {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Position {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Viewport size. Always whole pixels (fractional sizes are floored on the way in).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Values the motion engine and velocity estimator can work with: `f64` for a single axis and
/// [`Position`] for the plane.
pub trait Vector:
    Copy
    + Default
    + PartialEq
    + core::fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Euclidean length (absolute value for scalars).
    fn magnitude(self) -> f64;

    /// No component is NaN or infinite.
    fn is_finite(self) -> bool;
}

impl Vector for f64 {
    fn magnitude(self) -> f64 {
        self.abs()
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl Vector for Position {
    fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Interaction state of a scroll domain.
///
/// Everything except `Idle` counts as "scrolling".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    /// A pointer is down and driving the offset.
    Dragging,
    /// Post-release velocity decay, one frame at a time.
    Momentum,
    /// A programmatic, snap or bounds-return animation is in flight.
    Animating,
}

impl Phase {
    pub fn is_scrolling(self) -> bool {
        self != Self::Idle
    }
}
