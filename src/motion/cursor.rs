use std::collections::BTreeSet;

use crate::{
    animation::anim::{Lerp, Tween},
    animation::ease::Ease,
    foundation::core::{ElementId, Millis, Point, Rgba8},
};

/// Follow and hover transition length.
pub const CURSOR_EASE_DURATION: Millis = Millis(300);
/// Hover colour of the cursor follower.
pub const CURSOR_ACCENT: Rgba8 = Rgba8::opaque(0xFF, 0x57, 0x33);

/// Scale, opacity and colour of the cursor dot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CursorLook {
    /// Dot scale.
    pub scale: f64,
    /// Dot opacity.
    pub opacity: f64,
    /// Dot colour.
    pub color: Rgba8,
}

impl CursorLook {
    /// Look away from interactive elements.
    pub const REST: Self = Self {
        scale: 1.0,
        opacity: 0.3,
        color: Rgba8::WHITE,
    };
    /// Look over an interactive element.
    pub const HOVER: Self = Self {
        scale: 1.5,
        opacity: 0.7,
        color: CURSOR_ACCENT,
    };
}

impl Lerp for CursorLook {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            color: Rgba8::lerp(&a.color, &b.color, t),
        }
    }
}

#[derive(Clone, Debug)]
struct Transition<T> {
    started: Millis,
    tween: Tween<T>,
}

impl<T: Lerp + Clone> Transition<T> {
    fn settled(value: T) -> Self {
        Self {
            started: Millis::ZERO,
            tween: Tween::new(value.clone(), value, CURSOR_EASE_DURATION, Ease::Linear),
        }
    }

    fn sample(&self, now: Millis) -> T {
        self.tween.sample(now.saturating_sub(self.started))
    }

    fn retarget(&mut self, now: Millis, to: T, ease: Ease) {
        let from = self.sample(now);
        self.started = now;
        self.tween = Tween::new(from, to, CURSOR_EASE_DURATION, ease);
    }
}

/// Sampled cursor follower state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CursorFrame {
    /// Eased dot position.
    pub position: Point,
    /// Current look.
    pub look: CursorLook,
    /// Dot is shown.
    pub visible: bool,
}

/// Eased pointer follower with a hover look on registered interactive
/// elements.
#[derive(Clone, Debug)]
pub struct CursorFollower {
    position: Transition<Point>,
    look: Transition<CursorLook>,
    interactive: BTreeSet<ElementId>,
    hovering: Option<ElementId>,
    visible: bool,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorFollower {
    /// Visible follower at the origin with no interactive elements.
    pub fn new() -> Self {
        Self {
            position: Transition::settled(Point::ZERO),
            look: Transition::settled(CursorLook::REST),
            interactive: BTreeSet::new(),
            hovering: None,
            visible: true,
        }
    }

    /// Mark `id` as interactive. Returns false if it already was.
    pub fn register_interactive(&mut self, id: ElementId) -> bool {
        self.interactive.insert(id)
    }

    /// Stop treating `id` as interactive, dropping its hover.
    pub fn unregister_interactive(&mut self, id: ElementId) -> bool {
        if self.hovering == Some(id) {
            self.hovering = None;
        }
        self.interactive.remove(&id)
    }

    /// Pointer is over at least one interactive element.
    pub fn is_hovering(&self) -> bool {
        self.hovering.is_some()
    }

    /// Follower is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Ease towards `to`, starting from the current sampled position.
    pub fn pointer_move(&mut self, now: Millis, to: Point) {
        self.position.retarget(now, to, Ease::OutCubic);
    }

    /// Returns `false` for elements that were never registered.
    pub fn pointer_enter(&mut self, now: Millis, id: ElementId) -> bool {
        if !self.interactive.contains(&id) {
            tracing::debug!(element = %id, "pointer enter on non-interactive element");
            return false;
        }
        if self.hovering.is_none() {
            self.look.retarget(now, CursorLook::HOVER, Ease::OutQuad);
        }
        self.hovering = Some(id);
        true
    }

    /// Leave a hovered element. Returns whether the hover look was dropped.
    pub fn pointer_leave(&mut self, now: Millis, id: ElementId) -> bool {
        if self.hovering != Some(id) {
            return false;
        }
        self.hovering = None;
        self.look.retarget(now, CursorLook::REST, Ease::OutQuad);
        true
    }

    /// Show or hide the follower.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Follower position at `now`.
    pub fn position_at(&self, now: Millis) -> Point {
        self.position.sample(now)
    }

    /// Size and colour at `now`, mid-transition if a hover just changed.
    pub fn look_at(&self, now: Millis) -> CursorLook {
        let mut look = self.look.sample(now);
        if !self.visible {
            look.opacity = 0.0;
        }
        look
    }

    /// Full follower state at `now`.
    pub fn frame(&self, now: Millis) -> CursorFrame {
        CursorFrame {
            position: self.position_at(now),
            look: self.look_at(now),
            visible: self.visible,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/cursor.rs"]
mod tests;
