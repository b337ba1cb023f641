use crate::{
    foundation::core::Millis,
    foundation::error::{MotionError, MotionResult},
};

/// Count-up length used when a counter does not set one.
pub const DEFAULT_COUNTER_DURATION: Millis = Millis(2000);

/// Integer count-up from zero to `target` over `duration`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Counter {
    /// Final value.
    pub target: u64,
    /// Time to reach `target`.
    #[serde(default = "default_counter_duration")]
    pub duration: Millis,
}

fn default_counter_duration() -> Millis {
    DEFAULT_COUNTER_DURATION
}

impl Counter {
    /// Counter to `target` over `duration`; the duration must be positive.
    pub fn new(target: u64, duration: Millis) -> MotionResult<Self> {
        let c = Self { target, duration };
        c.validate()?;
        Ok(c)
    }

    /// Rejects a zero duration.
    pub fn validate(&self) -> MotionResult<()> {
        if self.duration.is_zero() {
            return Err(MotionError::validation("counter duration must be > 0"));
        }
        Ok(())
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, elapsed: Millis) -> f64 {
        (elapsed.as_f64() / self.duration.as_f64()).min(1.0)
    }

    /// Displayed value `elapsed` after the count started.
    pub fn value_at(&self, elapsed: Millis) -> u64 {
        if elapsed >= self.duration {
            return self.target;
        }
        (self.progress(elapsed) * self.target as f64).floor() as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/counter.rs"]
mod tests;
