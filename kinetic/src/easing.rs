/// Easing curves for programmatic, snap and bounds-return animations.
///
/// Every curve maps `0.0 -> 0.0` and `1.0 -> 1.0`; inputs outside `[0, 1]` are clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    EaseInQuad,
    #[default]
    EaseOutQuint,
    SmoothStep,
    /// Starts like a quadratic ease-in and hands over to a quintic ease-out.
    ///
    /// Used when springing back into bounds: the offset leaves the overshoot gently instead of
    /// snapping away from it.
    Bounds,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInQuad => ease_in_quad(t),
            Self::EaseOutQuint => ease_out_quint(t),
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::Bounds => (1.0 - t) * ease_in_quad(t) + t * ease_out_quint(t),
        }
    }
}

#[inline]
fn ease_in_quad(t: f64) -> f64 {
    t * t
}

#[inline]
fn ease_out_quint(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}
