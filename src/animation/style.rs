use crate::{animation::anim::Lerp, foundation::core::Vec2};

/// Computed visual state of an animated element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleState {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Offset from the laid-out position in pixels.
    pub translate: Vec2,
    /// Uniform scale around the element centre.
    pub scale: f64,
}

impl StyleState {
    /// Fully visible, untransformed.
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Transparent and shifted by `(dx, dy)`.
    pub fn hidden_offset(dx: f64, dy: f64) -> Self {
        Self {
            opacity: 0.0,
            translate: Vec2::new(dx, dy),
            scale: 1.0,
        }
    }
}

impl Default for StyleState {
    fn default() -> Self {
        Self::VISIBLE
    }
}

impl Lerp for StyleState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}
