use crate::foundation::error::{MotionError, MotionResult};

/// Easing curves mapping linear progress `t in [0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Quadratic acceleration.
    InQuad,
    /// Quadratic deceleration.
    OutQuad,
    /// Quadratic acceleration then deceleration.
    InOutQuad,
    /// Cubic acceleration.
    InCubic,
    /// Cubic deceleration.
    OutCubic,
    /// Cubic acceleration then deceleration.
    InOutCubic,
    /// Quartic acceleration.
    InQuart,
    /// Quartic deceleration.
    OutQuart,
    /// Quartic acceleration then deceleration.
    InOutQuart,
    /// Half-cosine acceleration then deceleration.
    InOutSine,
    /// Overshooting spring settle (amplitude 1, period 0.75). Not monotonic,
    /// so it is left out of [`Ease::ALL`].
    OutElastic,
}

impl Ease {
    /// Every monotonic curve.
    pub const ALL: [Self; 11] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InOutSine,
    ];

    /// Eased progress for linear progress `t` (clamped to `[0, 1]`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
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
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::OutElastic => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                const PERIOD: f64 = 0.75;
                let phase = PERIOD / 4.0;
                let omega = std::f64::consts::TAU / PERIOD;
                2f64.powf(-10.0 * t) * ((t - phase) * omega).sin() + 1.0
            }
        }
    }

    /// Map the `family.direction` names used by web animation libraries
    /// (`power1.inOut`, `power2.out`, `sine.inOut`, `none`, ...).
    pub fn from_web_name(name: &str) -> MotionResult<Self> {
        let name = name.trim();
        let (family, dir) = name.split_once('.').unwrap_or((name, "out"));
        let ease = match (family, dir) {
            ("none" | "linear", _) => Self::Linear,
            ("power1" | "quad", "in") => Self::InQuad,
            ("power1" | "quad", "out") => Self::OutQuad,
            ("power1" | "quad", "inOut") => Self::InOutQuad,
            ("power2" | "cubic", "in") => Self::InCubic,
            ("power2" | "cubic", "out") => Self::OutCubic,
            ("power2" | "cubic", "inOut") => Self::InOutCubic,
            ("power3" | "quart", "in") => Self::InQuart,
            ("power3" | "quart", "out") => Self::OutQuart,
            ("power3" | "quart", "inOut") => Self::InOutQuart,
            ("sine", "inOut") => Self::InOutSine,
            ("elastic", "out") => Self::OutElastic,
            _ => {
                return Err(MotionError::validation(format!(
                    "unknown ease '{name}'"
                )));
            }
        };
        Ok(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
