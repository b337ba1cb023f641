use std::collections::BTreeMap;

use crate::{
    animation::anim::Tween,
    animation::ease::Ease,
    animation::style::StyleState,
    foundation::core::{ElementId, Millis},
    foundation::error::{MotionError, MotionResult},
};

/// Entry motion of a revealed element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RevealKind {
    /// Fade in while rising (`reveal-on-scroll`).
    #[default]
    FadeUp,
    /// Slide in from the left (`reveal-from-left`).
    FromLeft,
    /// Slide in from the right (`reveal-from-right`).
    FromRight,
    /// Grow in place (`reveal-zoom`).
    Zoom,
}

impl RevealKind {
    /// Style before the reveal plays.
    pub fn initial(self) -> StyleState {
        match self {
            Self::FadeUp => StyleState::hidden_offset(0.0, 30.0),
            Self::FromLeft => StyleState::hidden_offset(-50.0, 0.0),
            Self::FromRight => StyleState::hidden_offset(50.0, 0.0),
            Self::Zoom => StyleState {
                scale: 0.9,
                ..StyleState::hidden_offset(0.0, 0.0)
            },
        }
    }

    /// Style once the reveal has played.
    pub fn terminal(self) -> StyleState {
        StyleState::VISIBLE
    }

    fn from_class(class: &str) -> Option<Self> {
        match class {
            "reveal-on-scroll" => Some(Self::FadeUp),
            "reveal-from-left" => Some(Self::FromLeft),
            "reveal-from-right" => Some(Self::FromRight),
            "reveal-zoom" => Some(Self::Zoom),
            _ => None,
        }
    }
}

/// How an element transitions once its reveal fires.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealSpec {
    /// Starting style.
    #[serde(default)]
    pub kind: RevealKind,
    /// Wait between the trigger and the transition.
    #[serde(default)]
    pub delay: Millis,
    /// Transition length.
    #[serde(default = "default_reveal_duration")]
    pub duration: Millis,
    /// Transition curve.
    #[serde(default = "default_reveal_ease")]
    pub ease: Ease,
}

fn default_reveal_duration() -> Millis {
    Millis(800)
}

fn default_reveal_ease() -> Ease {
    Ease::OutCubic
}

impl Default for RevealSpec {
    fn default() -> Self {
        Self {
            kind: RevealKind::default(),
            delay: Millis::ZERO,
            duration: default_reveal_duration(),
            ease: default_reveal_ease(),
        }
    }
}

impl RevealSpec {
    /// Rejects a zero duration.
    pub fn validate(&self) -> MotionResult<()> {
        if self.duration.is_zero() {
            return Err(MotionError::validation("reveal duration must be > 0"));
        }
        Ok(())
    }

    /// Read a spec from marker classes such as
    /// `"reveal-from-left reveal-delay-200"`. Returns `None` when no reveal
    /// class is present.
    pub fn from_classes(classes: &str) -> MotionResult<Option<Self>> {
        let mut spec: Option<Self> = None;
        let mut delay = Millis::ZERO;
        for class in classes.split_whitespace() {
            if let Some(kind) = RevealKind::from_class(class) {
                spec = Some(Self {
                    kind,
                    ..Self::default()
                });
            } else if let Some(ms) = class.strip_prefix("reveal-delay-") {
                let ms: u64 = ms.parse().map_err(|_| {
                    MotionError::validation(format!("bad reveal delay class '{class}'"))
                })?;
                delay = Millis(ms);
            }
        }
        Ok(spec.map(|s| Self { delay, ..s }))
    }

    fn tween(&self) -> Tween<StyleState> {
        Tween::new(
            self.kind.initial(),
            self.kind.terminal(),
            self.duration,
            self.ease,
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct BoardEntry {
    spec: RevealSpec,
    applied_at: Option<Millis>,
}

/// Terminal-style bookkeeping for revealable elements.
///
/// Applying a reveal is idempotent: the first application wins and later
/// ones neither restart nor alter the transition.
#[derive(Debug, Default)]
pub struct RevealBoard {
    entries: BTreeMap<ElementId, BoardEntry>,
}

impl RevealBoard {
    /// Board tracking no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `id` with its reveal; it stays at its initial style until applied.
    pub fn register(&mut self, id: ElementId, spec: RevealSpec) -> MotionResult<()> {
        spec.validate()?;
        self.entries.insert(
            id,
            BoardEntry {
                spec,
                applied_at: None,
            },
        );
        Ok(())
    }

    /// Stop tracking `id`.
    pub fn remove(&mut self, id: ElementId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Number of tracked elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No tracked elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked elements in id order.
    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.entries.keys()
    }

    /// Mark `id` revealed at `now`. Returns `true` only on the first
    /// application; unknown ids are a no-op.
    pub fn apply(&mut self, id: ElementId, now: Millis) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            tracing::debug!(element = %id, "reveal for unregistered element ignored");
            return false;
        };
        if entry.applied_at.is_some() {
            return false;
        }
        entry.applied_at = Some(now);
        true
    }

    /// Whether the reveal of `id` has been triggered.
    pub fn is_applied(&self, id: ElementId) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|e| e.applied_at.is_some())
    }

    /// Sampled style of `id` at `now`, or `None` for unknown ids.
    pub fn style_at(&self, id: ElementId, now: Millis) -> Option<StyleState> {
        let entry = self.entries.get(&id)?;
        let Some(at) = entry.applied_at else {
            return Some(entry.spec.kind.initial());
        };
        let start = at.saturating_add(entry.spec.delay);
        if now < start {
            return Some(entry.spec.kind.initial());
        }
        Some(entry.spec.tween().sample(now.saturating_sub(start)))
    }

    /// Whether the reveal transition of `id` has reached its terminal state.
    pub fn is_settled(&self, id: ElementId, now: Millis) -> bool {
        self.entries.get(&id).is_some_and(|e| match e.applied_at {
            Some(at) => now >= at.saturating_add(e.spec.delay).saturating_add(e.spec.duration),
            None => false,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/style.rs"]
mod tests;
