//! Easing curves applied to segment progress
//!
//! Every curve maps normalized progress in `[0, 1]` onto `[0, 1]` with
//! `f(0) = 0` and `f(1) = 1`. Curves are resolved from their names when a
//! document is loaded; an unknown name is an error.

use std::f32::consts::FRAC_PI_2;
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::AnimationError;

/// Named easing curve governing the transition into a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EasingFunction {
    /// `f(t) = t`
    #[default]
    Linear,
    /// Ease-in, `t²`
    Quadratic,
    /// Ease-in, `t³`
    Cubic,
    /// Ease-in, `t⁴`
    Quartic,
    /// Ease-out, `√t`
    Sqrt,
    /// Ease-out quarter sine
    Sin,
    /// Ease-in-out half cosine
    CosShifted,
    /// Ease-out with three decaying bounces
    Bounce,
    EaseOutQuadratic,
    EaseInOutQuadratic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuartic,
    EaseInOutQuartic,
}

impl EasingFunction {
    /// All registered curves, in declaration order
    pub const ALL: [Self; 14] = [
        Self::Linear,
        Self::Quadratic,
        Self::Cubic,
        Self::Quartic,
        Self::Sqrt,
        Self::Sin,
        Self::CosShifted,
        Self::Bounce,
        Self::EaseOutQuadratic,
        Self::EaseInOutQuadratic,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
        Self::EaseOutQuartic,
        Self::EaseInOutQuartic,
    ];

    /// Name used in animation documents
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Quadratic => "Quadratic",
            Self::Cubic => "Cubic",
            Self::Quartic => "Quartic",
            Self::Sqrt => "Sqrt",
            Self::Sin => "Sin",
            Self::CosShifted => "CosShifted",
            Self::Bounce => "Bounce",
            Self::EaseOutQuadratic => "EaseOutQuadratic",
            Self::EaseInOutQuadratic => "EaseInOutQuadratic",
            Self::EaseOutCubic => "EaseOutCubic",
            Self::EaseInOutCubic => "EaseInOutCubic",
            Self::EaseOutQuartic => "EaseOutQuartic",
            Self::EaseInOutQuartic => "EaseInOutQuartic",
        }
    }

    /// Remap normalized progress
    ///
    /// Input is clamped to `[0, 1]` before the curve is evaluated, and the
    /// endpoints map exactly onto themselves.
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Quadratic => t * t,
            Self::Cubic => t * t * t,
            Self::Quartic => t * t * t * t,
            Self::Sqrt => t.sqrt(),
            Self::Sin => (t * FRAC_PI_2).sin(),
            Self::CosShifted => (1.0 - (t * PI).cos()) / 2.0,
            Self::Bounce => bounce_out(t),
            Self::EaseOutQuadratic => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOutQuadratic => in_out(t, 2),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => in_out(t, 3),
            Self::EaseOutQuartic => 1.0 - (1.0 - t).powi(4),
            Self::EaseInOutQuartic => in_out(t, 4),
        }
    }
}

/// Symmetric polynomial ease-in-out of the given degree
fn in_out(t: f32, degree: i32) -> f32 {
    // 2^(n-1) * t^n on the first half, mirrored on the second
    let scale = 2f32.powi(degree - 1);
    if t < 0.5 {
        scale * t.powi(degree)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(degree) / 2.0
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984_375
    }
}

impl fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingFunction {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| AnimationError::UnknownEasingFunction(s.to_string()))
    }
}
