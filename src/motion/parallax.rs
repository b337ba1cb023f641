use std::collections::BTreeMap;

use crate::{
    foundation::core::{ElementId, Point, Vec2},
    foundation::error::{MotionError, MotionResult},
};

/// Speed used for layers that do not declare one.
pub const DEFAULT_PARALLAX_SPEED: f64 = 0.2;
/// Hero grid pointer factor.
pub const HERO_GRID_FACTOR: f64 = 0.03;

/// Scroll-linked vertical offset: `-(scroll * speed)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parallax {
    /// Fraction of the scroll the layer moves by, in `[0, 1]`.
    pub speed: f64,
}

impl Parallax {
    /// Layer moving at `speed` times the scroll; `speed` is in `[0, 1]`.
    pub fn new(speed: f64) -> MotionResult<Self> {
        let p = Self { speed };
        p.validate()?;
        Ok(p)
    }

    /// Speed must lie in `[0, 1]`.
    pub fn validate(&self) -> MotionResult<()> {
        if !self.speed.is_finite() || !(0.0..=1.0).contains(&self.speed) {
            return Err(MotionError::validation(format!(
                "parallax speed {} must be in [0, 1]",
                self.speed
            )));
        }
        Ok(())
    }

    /// Vertical offset for a scroll position.
    pub fn offset(&self, scroll: f64) -> f64 {
        -(scroll * self.speed)
    }
}

impl Default for Parallax {
    fn default() -> Self {
        Self {
            speed: DEFAULT_PARALLAX_SPEED,
        }
    }
}

/// Explicitly registered parallax layers.
#[derive(Clone, Debug, Default)]
pub struct ParallaxField {
    layers: BTreeMap<ElementId, Parallax>,
}

impl ParallaxField {
    /// Field with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The hero light beams: `count` layers with speeds `(i + 1) * 0.05`,
    /// registered as elements `first`, `first + 1`, ...
    pub fn beams(first: ElementId, count: u32) -> MotionResult<Self> {
        let mut field = Self::new();
        for i in 0..count {
            field.register(
                ElementId(first.0 + i),
                Parallax::new(f64::from(i + 1) * 0.05)?,
            )?;
        }
        Ok(field)
    }

    /// Add or replace the layer for `id`.
    pub fn register(&mut self, id: ElementId, layer: Parallax) -> MotionResult<()> {
        layer.validate()?;
        self.layers.insert(id, layer);
        Ok(())
    }

    /// Drop the layer for `id`.
    pub fn remove(&mut self, id: ElementId) -> bool {
        self.layers.remove(&id).is_some()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// No layers registered.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Speed of the layer for `id`.
    pub fn speed_of(&self, id: ElementId) -> Option<f64> {
        self.layers.get(&id).map(|p| p.speed)
    }

    /// Offset of every layer, in element order.
    pub fn offsets(&self, scroll: f64) -> Vec<(ElementId, f64)> {
        self.layers
            .iter()
            .map(|(id, p)| (*id, p.offset(scroll)))
            .collect()
    }
}

/// Pointer-linked offset relative to the viewport centre.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerParallax {
    /// Offset per pixel of pointer distance from the centre.
    pub factor: f64,
}

impl Default for PointerParallax {
    fn default() -> Self {
        Self {
            factor: HERO_GRID_FACTOR,
        }
    }
}

impl PointerParallax {
    /// Offset for a pointer position, proportional to its distance from the viewport centre.
    pub fn offset(&self, pointer: Point, viewport: Vec2) -> Vec2 {
        let center = Point::new(viewport.x * 0.5, viewport.y * 0.5);
        (pointer - center) * self.factor
    }
}

/// Scroll hint that fades out over the first half of the hero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFade {
    /// Height of the hero section in pixels.
    pub hero_height: f64,
}

/// Opacity and vertical drift of the scroll hint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FadeSample {
    /// Hint opacity.
    pub opacity: f64,
    /// Hint drift in pixels.
    pub y: f64,
}

impl ScrollFade {
    /// Fade scaled to `hero_height`, which must be positive.
    pub fn new(hero_height: f64) -> MotionResult<Self> {
        if !hero_height.is_finite() || hero_height <= 0.0 {
            return Err(MotionError::validation("hero height must be > 0"));
        }
        Ok(Self { hero_height })
    }

    /// Fade progress in `[0, 1]`.
    pub fn progress(&self, scroll: f64) -> f64 {
        (scroll / (self.hero_height * 0.5)).min(1.0)
    }

    /// Hint state for a scroll position.
    pub fn sample(&self, scroll: f64) -> FadeSample {
        FadeSample {
            opacity: (1.0 - 2.0 * self.progress(scroll)).max(0.0),
            y: scroll * 0.2,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/parallax.rs"]
mod tests;
