use crate::{
    foundation::core::Millis,
    foundation::error::{MotionError, MotionResult},
};

/// Loop duration of the technology strip.
pub const TECH_MARQUEE_LOOP: Millis = Millis(60_000);

/// Endless horizontal scroll of a track made of `copies` identical runs.
///
/// The visible offset wraps every `width` pixels (one copy), which is seamless
/// as long as there are at least two copies on the track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marquee {
    width: f64,
    speed: f64, // px per ms
}

impl Marquee {
    /// Marquee looping over `width` pixels at `speed` pixels per millisecond.
    pub fn new(width: f64, speed: f64) -> MotionResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(MotionError::validation("marquee width must be > 0"));
        }
        if !speed.is_finite() || speed <= 0.0 {
            return Err(MotionError::validation("marquee speed must be > 0"));
        }
        Ok(Self { width, speed })
    }

    /// Marquee over a track of `copies` identical copies, one copy per `loop_duration`.
    pub fn from_track(track_width: f64, copies: u32, loop_duration: Millis) -> MotionResult<Self> {
        if copies < 2 {
            return Err(MotionError::validation(
                "marquee track needs at least two copies",
            ));
        }
        if loop_duration.is_zero() {
            return Err(MotionError::validation("marquee loop duration must be > 0"));
        }
        let width = track_width / f64::from(copies);
        Self::new(width, width / loop_duration.as_f64())
    }

    /// Loop width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Pixels per millisecond.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Time for one copy to scroll past, in milliseconds.
    pub fn period(&self) -> f64 {
        self.width / self.speed
    }

    /// Unwrapped distance travelled by `t`.
    pub fn distance_at(&self, t: Millis) -> f64 {
        t.as_f64() * self.speed
    }

    /// Horizontal offset of the track, in `(-width, 0]`.
    pub fn offset_at(&self, t: Millis) -> f64 {
        let wrapped = self.distance_at(t).rem_euclid(self.width);
        if wrapped == 0.0 { 0.0 } else { -wrapped }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/marquee.rs"]
mod tests;
