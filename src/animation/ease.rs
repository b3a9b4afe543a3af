use std::str::FromStr;

use crate::foundation::error::ReelError;

/// Easing functions used to map normalized step progress.
///
/// Every variant maps `0 -> 0` and `1 -> 1` exactly. `OutBack` and `OutElastic` overshoot in
/// between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation (`none`).
    Linear,
    /// Quadratic ease-in (`power1.in`).
    InQuad,
    /// Quadratic ease-out (`power1.out`).
    #[default]
    OutQuad,
    /// Quadratic ease-in/out (`power1.inOut`).
    InOutQuad,
    /// Cubic ease-in (`power2.in`).
    InCubic,
    /// Cubic ease-out (`power2.out`).
    OutCubic,
    /// Cubic ease-in/out (`power2.inOut`).
    InOutCubic,
    /// Quartic ease-in (`power3.in`).
    InQuart,
    /// Quartic ease-out (`power3.out`).
    OutQuart,
    /// Quartic ease-in/out (`power3.inOut`).
    InOutQuart,
    /// Overshooting ease-out (`back.out`).
    OutBack,
    /// Damped spring ease-out (`elastic.out`).
    OutElastic,
}

impl Ease {
    /// All variants, in declaration order.
    pub const ALL: [Ease; 12] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::OutBack,
        Ease::OutElastic,
    ];

    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::OutBack => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            Self::OutElastic => {
                const C4: f64 = (2.0 * std::f64::consts::PI) / 3.0;
                2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
            }
        }
    }
}

impl FromStr for Ease {
    type Err = ReelError;

    /// Accepts GSAP-style names (`power3.out`, `none`, `back.out`) as well as the variant names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ease = match s.trim() {
            "none" | "linear" | "Linear" => Self::Linear,
            "power1.in" | "InQuad" => Self::InQuad,
            "power1.out" | "power1" | "OutQuad" => Self::OutQuad,
            "power1.inOut" | "InOutQuad" => Self::InOutQuad,
            "power2.in" | "InCubic" => Self::InCubic,
            "power2.out" | "power2" | "OutCubic" => Self::OutCubic,
            "power2.inOut" | "InOutCubic" => Self::InOutCubic,
            "power3.in" | "InQuart" => Self::InQuart,
            "power3.out" | "power3" | "OutQuart" => Self::OutQuart,
            "power3.inOut" | "InOutQuart" => Self::InOutQuart,
            "back.out" | "back" | "OutBack" => Self::OutBack,
            "elastic.out" | "elastic" | "OutElastic" => Self::OutElastic,
            other => return Err(ReelError::parse(format!("unknown ease '{other}'"))),
        };
        Ok(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
