use std::collections::BTreeSet;

use crate::{
    foundation::core::ElementId,
    foundation::error::{MotionError, MotionResult},
    reveal::geometry::{IntersectionEntry, RootMargin},
    schedule::lifecycle::Lifecycle,
    schedule::timer::Scheduler,
};

/// Intersection settings of a [`VisibilityTrigger`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerOptions {
    /// Fraction of the element that must be visible, in `[0, 1]`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Growth of the viewport before intersecting.
    #[serde(default)]
    pub root_margin: RootMargin,
}

fn default_threshold() -> f64 {
    0.1
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            root_margin: RootMargin::default(),
        }
    }
}

impl TriggerOptions {
    /// Threshold must lie in `[0, 1]` and the margin must be finite.
    pub fn validate(&self) -> MotionResult<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(MotionError::validation(
                "trigger threshold must be finite and within [0, 1]",
            ));
        }
        self.root_margin.validate()
    }
}

/// Tracking state of one element as seen by the trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ObservedElement {
    /// Observed element.
    pub id: ElementId,
    /// Reveal has fired.
    pub revealed: bool,
}

/// One-shot reveal detector.
///
/// Each observed element is revealed on the first notification whose ratio
/// reaches the threshold and is then unobserved; scrolling away and back
/// never reveals it again.
#[derive(Debug)]
pub struct VisibilityTrigger {
    options: TriggerOptions,
    observed: BTreeSet<ElementId>,
    revealed: BTreeSet<ElementId>,
    armed: bool,
    torn_down: bool,
}

impl VisibilityTrigger {
    /// Build an armed trigger.
    pub fn new(options: TriggerOptions) -> MotionResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            observed: BTreeSet::new(),
            revealed: BTreeSet::new(),
            armed: true,
            torn_down: false,
        })
    }

    /// Build a trigger that ignores notifications until [`Self::arm`].
    pub fn disarmed(options: TriggerOptions) -> MotionResult<Self> {
        let mut t = Self::new(options)?;
        t.armed = false;
        Ok(t)
    }

    /// Options the trigger was built with.
    pub fn options(&self) -> TriggerOptions {
        self.options
    }

    /// Start reacting to delivered notifications.
    pub fn arm(&mut self) {
        if !self.torn_down {
            self.armed = true;
        }
    }

    /// Notifications are being acted on.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Register an element. Returns `false` if it is already observed, was
    /// already revealed, or the trigger has been torn down.
    pub fn observe(&mut self, id: ElementId) -> bool {
        if self.torn_down || self.revealed.contains(&id) {
            return false;
        }
        self.observed.insert(id)
    }

    /// Stop watching `id` without revealing it.
    pub fn unobserve(&mut self, id: ElementId) -> bool {
        self.observed.remove(&id)
    }

    /// `id` is still waiting for its reveal.
    pub fn is_observed(&self, id: ElementId) -> bool {
        self.observed.contains(&id)
    }

    /// `id` has been revealed.
    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.revealed.contains(&id)
    }

    /// Observation state of `id`, if it was ever observed.
    pub fn element(&self, id: ElementId) -> Option<ObservedElement> {
        if self.revealed.contains(&id) {
            Some(ObservedElement { id, revealed: true })
        } else if self.observed.contains(&id) {
            Some(ObservedElement { id, revealed: false })
        } else {
            None
        }
    }

    /// Elements still waiting for their reveal.
    pub fn observed(&self) -> impl Iterator<Item = &ElementId> {
        self.observed.iter()
    }

    /// Number of elements still waiting.
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Process one notification batch in delivery order, calling `on_reveal`
    /// synchronously for each element revealed by it. Returns the number of
    /// reveals.
    pub fn deliver(
        &mut self,
        entries: &[IntersectionEntry],
        mut on_reveal: impl FnMut(ElementId),
    ) -> usize {
        if self.torn_down || !self.armed {
            return 0;
        }
        let mut count = 0;
        for entry in entries {
            if !self.observed.contains(&entry.element) {
                continue;
            }
            // Touching the root edge (ratio 0) never counts, even at threshold 0.
            // NaN fails both comparisons.
            if !(entry.ratio > 0.0 && entry.ratio >= self.options.threshold) {
                continue;
            }
            self.observed.remove(&entry.element);
            self.revealed.insert(entry.element);
            tracing::debug!(element = %entry.element, ratio = entry.ratio, "revealed");
            on_reveal(entry.element);
            count += 1;
        }
        count
    }

    /// Unobserve everything and stop reacting to notifications.
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.armed = false;
        self.torn_down = true;
    }
}

impl Lifecycle for VisibilityTrigger {
    fn start(&mut self, _sched: &mut dyn Scheduler) -> MotionResult<()> {
        if self.torn_down {
            return Err(MotionError::animation("trigger was torn down"));
        }
        self.arm();
        Ok(())
    }

    fn teardown(&mut self, _sched: &mut dyn Scheduler) {
        self.disconnect();
    }

    fn is_live(&self) -> bool {
        !self.torn_down
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/trigger.rs"]
mod tests;
