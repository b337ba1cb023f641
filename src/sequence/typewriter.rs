//! Typewriter text cycler.
//!
//! Types a list of strings one step at a time, holds each finished string,
//! erases it (optionally only down to the prefix it shares with the next
//! string) and moves on. In loop mode it never terminates; teardown is the
//! only way to stop it. Markup tags such as `<span class="x">` are typed as a
//! single step so the visible text is always well formed.

use crate::{
    foundation::core::Millis,
    foundation::error::{MotionError, MotionResult},
    schedule::lifecycle::Lifecycle,
    schedule::timer::{OwnerId, Scheduler, TimerId, TimerSlot},
};

/// Strings and timings of a [`Typewriter`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypewriterOptions {
    /// Strings typed in turn; none may be empty.
    pub strings: Vec<String>,
    /// Delay between typed steps.
    #[serde(default = "default_type_speed")]
    pub type_speed: Millis,
    /// Delay between erased steps.
    #[serde(default = "default_back_speed")]
    pub back_speed: Millis,
    /// Pause on a fully typed string before erasing.
    #[serde(default = "default_back_delay")]
    pub back_delay: Millis,
    /// Wait before the first character.
    #[serde(default)]
    pub start_delay: Millis,
    /// Wrap back to the first string after the last.
    #[serde(default = "default_true")]
    pub loop_forever: bool,
    /// Erase only down to the prefix shared with the next string.
    #[serde(default = "default_true")]
    pub smart_backspace: bool,
    /// Cursor appended to the visible text.
    #[serde(default = "default_cursor_char")]
    pub cursor_char: Option<char>,
}

fn default_type_speed() -> Millis {
    Millis(30)
}

fn default_back_speed() -> Millis {
    Millis(15)
}

fn default_back_delay() -> Millis {
    Millis(1500)
}

fn default_true() -> bool {
    true
}

fn default_cursor_char() -> Option<char> {
    Some('_')
}

impl TypewriterOptions {
    /// Looping, smart-backspacing options with the hero timings.
    pub fn new(strings: Vec<String>) -> Self {
        Self {
            strings,
            type_speed: default_type_speed(),
            back_speed: default_back_speed(),
            back_delay: default_back_delay(),
            start_delay: Millis::ZERO,
            loop_forever: true,
            smart_backspace: true,
            cursor_char: default_cursor_char(),
        }
    }

    /// Type one string once at `speed` per character, without a cursor.
    pub fn single(text: impl Into<String>, speed: Millis) -> Self {
        Self {
            type_speed: speed,
            loop_forever: false,
            cursor_char: None,
            ..Self::new(vec![text.into()])
        }
    }

    /// Needs at least one non-empty string and positive timings.
    pub fn validate(&self) -> MotionResult<()> {
        if self.strings.is_empty() {
            return Err(MotionError::validation(
                "typewriter needs at least one string",
            ));
        }
        if self.strings.iter().any(|s| s.is_empty()) {
            return Err(MotionError::validation(
                "typewriter strings must be non-empty",
            ));
        }
        if self.type_speed.is_zero() || self.back_speed.is_zero() {
            return Err(MotionError::validation(
                "typewriter type_speed and back_speed must be > 0",
            ));
        }
        Ok(())
    }
}

/// Split text into typing steps: one per character, one per markup tag.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut steps = Vec::new();
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        let len = if c == '<' {
            rest.find('>').map_or(c.len_utf8(), |end| end + 1)
        } else {
            c.len_utf8()
        };
        let (step, tail) = rest.split_at(len);
        steps.push(step);
        rest = tail;
    }
    steps
}

/// What the typewriter does on its next timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TypewriterPhase {
    /// Not started, or waiting for the start delay.
    Idle,
    /// Adding one character per step.
    Typing,
    /// Showing a complete string.
    Holding,
    /// Removing one character per step.
    Erasing,
    /// Last string typed without loop mode.
    Done,
    /// Torn down.
    Cancelled,
}

/// Emitted synchronously from [`Typewriter::on_timer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypewriterEvent {
    /// One more character is visible.
    Typed {
        /// String being typed.
        string_index: usize,
        /// Characters now visible.
        visible: usize,
    },
    /// One character was removed.
    Erased {
        /// String being erased.
        string_index: usize,
        /// Characters still visible.
        visible: usize,
    },
    /// A string is fully typed.
    StringComplete {
        /// String that completed.
        string_index: usize,
    },
    /// The last string was typed and looping is off.
    Finished,
}

/// Types, holds and erases its strings on a scheduler.
#[derive(Debug)]
pub struct Typewriter {
    options: TypewriterOptions,
    steps: Vec<Vec<String>>,
    string_index: usize,
    visible: usize,
    erase_to: usize,
    phase: TypewriterPhase,
    slot: TimerSlot,
}

impl Typewriter {
    /// Idle typewriter; fails on invalid options.
    pub fn new(owner: OwnerId, options: TypewriterOptions) -> MotionResult<Self> {
        options.validate()?;
        let steps = options
            .strings
            .iter()
            .map(|s| tokenize(s).into_iter().map(str::to_string).collect())
            .collect();
        Ok(Self {
            options,
            steps,
            string_index: 0,
            visible: 0,
            erase_to: 0,
            phase: TypewriterPhase::Idle,
            slot: TimerSlot::new(owner),
        })
    }

    /// Options the typewriter was built with.
    pub fn options(&self) -> &TypewriterOptions {
        &self.options
    }

    /// Current phase.
    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    /// Index of the string being typed or erased.
    pub fn string_index(&self) -> usize {
        self.string_index
    }

    /// Timer of the next step.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.slot.pending()
    }

    /// Currently visible text (markup included).
    pub fn text(&self) -> String {
        self.steps[self.string_index][..self.visible].concat()
    }

    /// Visible text followed by the cursor, if one is configured.
    pub fn display(&self) -> String {
        let mut out = self.text();
        if let Some(c) = self.options.cursor_char {
            out.push(c);
        }
        out
    }

    fn next_index(&self) -> usize {
        (self.string_index + 1) % self.steps.len()
    }

    fn shared_prefix(&self, a: usize, b: usize) -> usize {
        self.steps[a]
            .iter()
            .zip(&self.steps[b])
            .take_while(|(x, y)| x == y)
            .count()
    }

    fn begin_next_string(&mut self, sched: &mut dyn Scheduler) {
        self.string_index = self.next_index();
        self.phase = TypewriterPhase::Typing;
        self.slot.arm_after(sched, self.options.type_speed);
    }

    /// Advance one step on an owned timer; stale timers are ignored.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        sched: &mut dyn Scheduler,
        mut on_event: impl FnMut(TypewriterEvent),
    ) {
        if !self.slot.take(id) {
            return;
        }
        match self.phase {
            TypewriterPhase::Typing => {
                let len = self.steps[self.string_index].len();
                self.visible = (self.visible + 1).min(len);
                on_event(TypewriterEvent::Typed {
                    string_index: self.string_index,
                    visible: self.visible,
                });
                if self.visible < len {
                    self.slot.arm_after(sched, self.options.type_speed);
                    return;
                }
                on_event(TypewriterEvent::StringComplete {
                    string_index: self.string_index,
                });
                let last = self.string_index + 1 == self.steps.len();
                if last && !self.options.loop_forever {
                    self.phase = TypewriterPhase::Done;
                    tracing::debug!("typewriter finished");
                    on_event(TypewriterEvent::Finished);
                } else {
                    self.phase = TypewriterPhase::Holding;
                    self.slot.arm_after(sched, self.options.back_delay);
                }
            }
            TypewriterPhase::Holding => {
                // Wrapping back to the first string always erases fully.
                let has_next = self.string_index + 1 < self.steps.len();
                self.erase_to = if self.options.smart_backspace && has_next {
                    self.shared_prefix(self.string_index, self.string_index + 1)
                } else {
                    0
                };
                if self.visible <= self.erase_to {
                    self.visible = self.erase_to;
                    self.begin_next_string(sched);
                } else {
                    self.phase = TypewriterPhase::Erasing;
                    self.slot.arm_after(sched, self.options.back_speed);
                }
            }
            TypewriterPhase::Erasing => {
                self.visible = self.visible.saturating_sub(1).max(self.erase_to);
                on_event(TypewriterEvent::Erased {
                    string_index: self.string_index,
                    visible: self.visible,
                });
                if self.visible == self.erase_to {
                    self.begin_next_string(sched);
                } else {
                    self.slot.arm_after(sched, self.options.back_speed);
                }
            }
            TypewriterPhase::Idle | TypewriterPhase::Done | TypewriterPhase::Cancelled => {}
        }
    }
}

impl Lifecycle for Typewriter {
    fn start(&mut self, sched: &mut dyn Scheduler) -> MotionResult<()> {
        if self.phase != TypewriterPhase::Idle {
            return Err(MotionError::animation(format!(
                "typewriter cannot start from phase {:?}",
                self.phase
            )));
        }
        self.phase = TypewriterPhase::Typing;
        let first = self
            .options
            .start_delay
            .saturating_add(self.options.type_speed);
        self.slot.arm_after(sched, first);
        Ok(())
    }

    fn teardown(&mut self, sched: &mut dyn Scheduler) {
        self.slot.cancel(sched);
        if self.phase != TypewriterPhase::Done {
            self.phase = TypewriterPhase::Cancelled;
        }
    }

    fn is_live(&self) -> bool {
        !matches!(
            self.phase,
            TypewriterPhase::Done | TypewriterPhase::Cancelled
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/typewriter.rs"]
mod tests;
