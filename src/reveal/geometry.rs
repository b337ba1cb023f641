use crate::{
    foundation::core::{ElementId, Rect},
    foundation::error::{MotionError, MotionResult},
};

/// Offsets that grow (positive) or shrink (negative) the root rectangle
/// before intersecting, so elements can trigger before they are on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RootMargin {
    /// Top margin in pixels.
    #[serde(default)]
    pub top: f64,
    /// Right margin in pixels.
    #[serde(default)]
    pub right: f64,
    /// Bottom margin in pixels.
    #[serde(default)]
    pub bottom: f64,
    /// Left margin in pixels.
    #[serde(default)]
    pub left: f64,
}

impl RootMargin {
    /// Same margin on every side.
    pub fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    /// Margins must be finite.
    pub fn validate(&self) -> MotionResult<()> {
        for (name, v) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !v.is_finite() {
                return Err(MotionError::validation(format!(
                    "root margin {name} must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Root rectangle grown by the margin.
    pub fn apply(&self, root: Rect) -> Rect {
        Rect::new(
            root.x0 - self.left,
            root.y0 - self.top,
            root.x1 + self.right,
            root.y1 + self.bottom,
        )
    }
}

/// Fraction of `element` inside `root` after applying `margin`.
///
/// A zero-area element counts as fully visible when it lies within the root
/// and invisible otherwise. Non-finite bounds are never visible.
pub fn intersection_ratio(element: Rect, root: Rect, margin: RootMargin) -> f64 {
    if !rect_is_finite(element) || !rect_is_finite(root) {
        return 0.0;
    }
    let root = margin.apply(root);
    let area = element.area();
    if area <= 0.0 {
        let inside = element.x0 >= root.x0
            && element.x1 <= root.x1
            && element.y0 >= root.y0
            && element.y1 <= root.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    let hit = element.intersect(root);
    (hit.area() / area).clamp(0.0, 1.0)
}

pub(crate) fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

/// One notification of a batch: how much of an element is visible.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntersectionEntry {
    /// Measured element.
    pub element: ElementId,
    /// Visible fraction of the element's area, in `[0, 1]`.
    pub ratio: f64,
}

/// Where elements currently are on the page.
///
/// Returning `None` means the element is not (or no longer) in the tree.
pub trait LayoutSource {
    /// Page-space bounds of `id`.
    fn bounds(&self, id: ElementId) -> Option<Rect>;
}

impl LayoutSource for std::collections::BTreeMap<ElementId, Rect> {
    fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.get(&id).copied()
    }
}

/// Build a notification batch for `ids` against the viewport, skipping
/// elements the layout no longer knows about.
pub fn measure<'a>(
    ids: impl IntoIterator<Item = &'a ElementId>,
    layout: &dyn LayoutSource,
    viewport: Rect,
    margin: RootMargin,
) -> Vec<IntersectionEntry> {
    ids.into_iter()
        .filter_map(|&id| match layout.bounds(id) {
            Some(rect) => Some(IntersectionEntry {
                element: id,
                ratio: intersection_ratio(rect, viewport, margin),
            }),
            None => {
                tracing::debug!(element = %id, "observed element has no bounds; skipped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/geometry.rs"]
mod tests;
