use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{ElementId, Millis, Point},
    foundation::error::{MotionError, MotionResult},
    runtime::director::{PageDirector, PageFrame},
};

/// One user interaction replayed against a [`PageDirector`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionAction {
    /// Scroll the page.
    Scroll {
        /// New scroll offset in pixels.
        y: f64,
    },
    /// Move the pointer.
    PointerMove {
        /// Horizontal viewport position.
        x: f64,
        /// Vertical viewport position.
        y: f64,
    },
    /// Pointer entered an element.
    PointerEnter {
        /// Element entered.
        element: ElementId,
    },
    /// Pointer left an element.
    PointerLeave {
        /// Element left.
        element: ElementId,
    },
    /// Show or hide the cursor follower.
    CursorVisible {
        /// Follower is shown.
        visible: bool,
    },
    /// Pick a carousel item.
    Select {
        /// Carousel name.
        rotator: String,
        /// Item to show.
        index: usize,
    },
    /// Step a carousel forward.
    SelectNext {
        /// Carousel name.
        rotator: String,
    },
    /// Step a carousel back.
    SelectPrev {
        /// Carousel name.
        rotator: String,
    },
    /// Record a [`PageFrame`] snapshot.
    Frame,
    /// Tear the page down.
    Teardown,
}

/// Action performed once the clock reaches `at`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionStep {
    /// Clock time the action runs at.
    pub at: Millis,
    /// Interaction to replay.
    #[serde(flatten)]
    pub action: SessionAction,
}

/// Timed list of interactions; the clock runs to `until` after the last step.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionScript {
    /// Steps in time order.
    #[serde(default)]
    pub steps: Vec<SessionStep>,
    /// Final clock time; defaults to the last step.
    #[serde(default)]
    pub until: Option<Millis>,
}

impl SessionScript {
    /// Parse and validate a JSON session script.
    pub fn from_json(s: &str) -> MotionResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    /// Read, parse and validate a JSON session script file.
    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read session script '{}'", path.display()))?;
        Self::from_json(&s)
    }

    /// Steps must be time-sorted and `until` may not precede the last one.
    pub fn validate(&self) -> MotionResult<()> {
        if self.steps.windows(2).any(|w| w[1].at < w[0].at) {
            return Err(MotionError::validation(
                "session steps must be sorted by time",
            ));
        }
        if let (Some(until), Some(last)) = (self.until, self.steps.last())
            && until < last.at
        {
            return Err(MotionError::validation(
                "session 'until' is earlier than its last step",
            ));
        }
        Ok(())
    }

    /// Replay every step on a started director and return the recorded
    /// frames.
    #[tracing::instrument(skip_all, fields(steps = self.steps.len()))]
    pub fn run(&self, director: &mut PageDirector) -> MotionResult<Vec<PageFrame>> {
        let mut frames = Vec::new();
        for step in &self.steps {
            director.advance_to(step.at)?;
            match &step.action {
                SessionAction::Scroll { y } => {
                    director.scroll_to(*y)?;
                }
                SessionAction::PointerMove { x, y } => director.pointer_move(Point::new(*x, *y)),
                SessionAction::PointerEnter { element } => {
                    director.pointer_enter(*element);
                }
                SessionAction::PointerLeave { element } => {
                    director.pointer_leave(*element);
                }
                SessionAction::CursorVisible { visible } => director.set_cursor_visible(*visible),
                SessionAction::Select { rotator, index } => director.select(rotator, *index)?,
                SessionAction::SelectNext { rotator } => {
                    director.select_next(rotator)?;
                }
                SessionAction::SelectPrev { rotator } => {
                    director.select_prev(rotator)?;
                }
                SessionAction::Frame => frames.push(director.frame()),
                SessionAction::Teardown => director.teardown(),
            }
        }
        if let Some(until) = self.until {
            director.advance_to(until)?;
        }
        Ok(frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/session.rs"]
mod tests;
