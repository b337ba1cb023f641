use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Rect, Vec2};

/// A point or span on the page clock, in whole milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
/// Milliseconds on the virtual clock, or a duration in milliseconds.
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// The origin of the page clock.
    pub const ZERO: Self = Self(0);

    /// Build from fractional seconds, rounding to the nearest millisecond.
    pub fn from_secs_f64(secs: f64) -> MotionResult<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(MotionError::validation(
                "seconds must be finite and >= 0",
            ));
        }
        Ok(Self((secs * 1000.0).round() as u64))
    }

    /// Value as `f64` milliseconds.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Value as `f64` seconds.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// `self + rhs`, saturating at `u64::MAX`.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// `self - rhs`, saturating at zero.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Whether this span is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Handle of a page element registered with an orchestration component.
///
/// Elements are never looked up by marker class: whoever creates an animated
/// element passes its id to the component that animates it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Host-assigned identifier of a page element.
#[serde(transparent)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Straight (non-premultiplied) RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Fully opaque colour.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> MotionResult<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| MotionError::validation(format!("colour '{s}' must start with '#'")))?;
        let nibble = |c: u8| -> MotionResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| MotionError::validation(format!("colour '{s}' is not hex")))
        };
        let bytes = hex.as_bytes();
        let byte = |i: usize| -> MotionResult<u8> {
            Ok(nibble(bytes[i])? * 16 + nibble(bytes[i + 1])?)
        };
        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Ok(Self::opaque(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(MotionError::validation(format!(
                "colour '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
