use crate::{
    animation::ease::Ease,
    foundation::core::{Millis, Point, Rgba8, Vec2},
    foundation::error::{MotionError, MotionResult},
};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value `t` of the way from `a` to `b`; exact at `t = 0` and `t = 1`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

// Exact at both endpoints.
impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(<f64 as Lerp>::lerp(&a.x, &b.x, t), <f64 as Lerp>::lerp(&a.y, &b.y, t))
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(<f64 as Lerp>::lerp(&a.x, &b.x, t), <f64 as Lerp>::lerp(&a.y, &b.y, t))
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// A finite eased transition between two values, optionally repeated.
///
/// With `yoyo`, every odd pass runs backwards, so `repeat: 4, yoyo: true`
/// plays forward, back, forward, back, forward and ends on `to`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    /// Value at the start of a forward pass.
    pub from: T,
    /// Value at the end of a forward pass.
    pub to: T,
    /// Length of one pass.
    pub duration: Millis, // one pass
    /// Curve applied to every pass.
    pub ease: Ease,
    /// Extra passes after the first.
    #[serde(default)]
    pub repeat: u32,
    /// Alternate direction on every pass.
    #[serde(default)]
    pub yoyo: bool,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// Single forward pass from `from` to `to`.
    pub fn new(from: T, to: T, duration: Millis, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            ease,
            repeat: 0,
            yoyo: false,
        }
    }

    /// Play `repeat` extra passes, alternating direction with `yoyo`.
    pub fn repeat(mut self, repeat: u32, yoyo: bool) -> Self {
        self.repeat = repeat;
        self.yoyo = yoyo;
        self
    }

    /// Rejects a zero pass duration.
    pub fn validate(&self) -> MotionResult<()> {
        if self.duration.is_zero() {
            return Err(MotionError::validation("tween duration must be > 0"));
        }
        Ok(())
    }

    /// Length of all passes together.
    pub fn total_duration(&self) -> Millis {
        Millis(self.duration.0.saturating_mul(u64::from(self.repeat) + 1))
    }

    /// Every pass, repeats included, has played by `elapsed`.
    pub fn is_finished(&self, elapsed: Millis) -> bool {
        elapsed >= self.total_duration()
    }

    /// Value `elapsed` after the tween started; holds the final value afterwards.
    pub fn sample(&self, elapsed: Millis) -> T {
        if self.duration.is_zero() {
            return self.to.clone();
        }
        let (pass, t) = if self.is_finished(elapsed) {
            (u64::from(self.repeat), 1.0)
        } else {
            let pass = elapsed.0 / self.duration.0;
            let t = (elapsed.0 % self.duration.0) as f64 / self.duration.as_f64();
            (pass, t)
        };
        let t = if self.yoyo && pass % 2 == 1 { 1.0 - t } else { t };
        T::lerp(&self.from, &self.to, self.ease.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
