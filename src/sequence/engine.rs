//! Timed sequence engine.
//!
//! A [`SequenceScript`] is an ordered list of stages, each with an absolute
//! offset from the sequence start, followed by a completion offset. The
//! [`SequenceEngine`] walks the script with a single cursor and keeps exactly
//! one timer pending: the absolute due time of the next stage (or of the
//! completion). Because due times are computed from the start time rather
//! than chained from the previous firing, late firings never shift later
//! stages.

use crate::{
    foundation::core::Millis,
    foundation::error::{MotionError, MotionResult},
    schedule::lifecycle::Lifecycle,
    schedule::timer::{OwnerId, Scheduler, TimerId, TimerSlot},
};

/// One step of a script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceStage<A> {
    /// Offset from the sequence start.
    pub offset: Millis,
    /// Payload delivered when the stage fires.
    pub action: A,
}

impl<A> SequenceStage<A> {
    /// Stage firing `action` at `offset` from the start.
    pub fn new(offset: Millis, action: A) -> Self {
        Self { offset, action }
    }
}

/// Validated, immutable stage list.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequenceScript<A> {
    stages: Vec<SequenceStage<A>>,
    complete_at: Millis,
}

impl<A> SequenceScript<A> {
    /// Stages must be in non-decreasing offset order and the completion may
    /// not precede the last stage.
    pub fn new(stages: Vec<SequenceStage<A>>, complete_at: Millis) -> MotionResult<Self> {
        if stages.is_empty() {
            return Err(MotionError::validation(
                "sequence script needs at least one stage",
            ));
        }
        if !stages.windows(2).all(|w| w[0].offset <= w[1].offset) {
            return Err(MotionError::validation(
                "sequence stages must be sorted by offset",
            ));
        }
        let last = stages[stages.len() - 1].offset;
        if complete_at < last {
            return Err(MotionError::validation(format!(
                "sequence completion at {complete_at} precedes last stage at {last}"
            )));
        }
        Ok(Self {
            stages,
            complete_at,
        })
    }

    /// Stages in firing order.
    pub fn stages(&self) -> &[SequenceStage<A>] {
        &self.stages
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Script has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Offset of the completion event.
    pub fn complete_at(&self) -> Millis {
        self.complete_at
    }
}

/// Where a [`SequenceEngine`] is in its script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SequenceState {
    /// Not started.
    Idle,
    /// Waiting for a stage or the completion.
    Running {
        /// Index of the next stage; equals the stage count while waiting for completion.
        cursor: usize,
    },
    /// Completion fired.
    Complete,
    /// Torn down before completing.
    Cancelled,
}

/// Emitted synchronously from [`SequenceEngine::on_timer`].
#[derive(Debug, PartialEq)]
pub enum SequenceEvent<'a, A> {
    /// A stage reached its offset.
    Stage {
        /// Position of the stage in the script.
        index: usize,
        /// Offset of the stage from the start.
        offset: Millis,
        /// Action carried by the stage.
        action: &'a A,
    },
    /// The completion offset was reached.
    Complete,
}

/// Runs a [`SequenceScript`] on a scheduler, one timer at a time.
#[derive(Debug)]
pub struct SequenceEngine<A> {
    script: SequenceScript<A>,
    state: SequenceState,
    started_at: Option<Millis>,
    slot: TimerSlot,
}

impl<A> SequenceEngine<A> {
    /// Idle engine; timers are tagged with `owner`.
    pub fn new(owner: OwnerId, script: SequenceScript<A>) -> Self {
        Self {
            script,
            state: SequenceState::Idle,
            started_at: None,
            slot: TimerSlot::new(owner),
        }
    }

    /// Script being played.
    pub fn script(&self) -> &SequenceScript<A> {
        &self.script
    }

    /// Current state.
    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Index of the next stage to run, or the stage count once all ran.
    pub fn cursor(&self) -> usize {
        match self.state {
            SequenceState::Idle => 0,
            SequenceState::Running { cursor } => cursor,
            SequenceState::Complete => self.script.len(),
            SequenceState::Cancelled => self.script.len(),
        }
    }

    /// Completion has fired.
    pub fn is_complete(&self) -> bool {
        self.state == SequenceState::Complete
    }

    /// Clock time of `start`, once started.
    pub fn started_at(&self) -> Option<Millis> {
        self.started_at
    }

    /// Timer of the next stage or completion.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.slot.pending()
    }

    fn arm_next(&mut self, sched: &mut dyn Scheduler, start: Millis, cursor: usize) {
        let offset = self
            .script
            .stages
            .get(cursor)
            .map_or(self.script.complete_at, |s| s.offset);
        self.slot.arm_at(sched, start.saturating_add(offset));
    }

    /// Handle a firing. Runs every stage whose absolute time has been
    /// reached, in declared order, then either schedules the next one or
    /// completes. Stale timers and firings after teardown are ignored.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        sched: &mut dyn Scheduler,
        mut on_event: impl FnMut(SequenceEvent<'_, A>),
    ) -> usize {
        if !self.slot.take(id) {
            return 0;
        }
        let (SequenceState::Running { mut cursor }, Some(start)) = (self.state, self.started_at)
        else {
            return 0;
        };
        let elapsed = sched.now().saturating_sub(start);
        let mut emitted = 0;

        while let Some(stage) = self.script.stages.get(cursor) {
            if stage.offset > elapsed {
                break;
            }
            tracing::debug!(index = cursor, offset = stage.offset.0, "sequence stage");
            on_event(SequenceEvent::Stage {
                index: cursor,
                offset: stage.offset,
                action: &stage.action,
            });
            cursor += 1;
            emitted += 1;
        }

        if cursor == self.script.len() && self.script.complete_at <= elapsed {
            self.state = SequenceState::Complete;
            tracing::debug!(at = sched.now().0, "sequence complete");
            on_event(SequenceEvent::Complete);
            return emitted + 1;
        }

        self.state = SequenceState::Running { cursor };
        self.arm_next(sched, start, cursor);
        emitted
    }
}

impl<A> Lifecycle for SequenceEngine<A> {
    fn start(&mut self, sched: &mut dyn Scheduler) -> MotionResult<()> {
        if self.state != SequenceState::Idle {
            return Err(MotionError::animation(format!(
                "sequence cannot start from state {:?}",
                self.state
            )));
        }
        let start = sched.now();
        self.started_at = Some(start);
        self.state = SequenceState::Running { cursor: 0 };
        self.arm_next(sched, start, 0);
        Ok(())
    }

    fn teardown(&mut self, sched: &mut dyn Scheduler) {
        self.slot.cancel(sched);
        if matches!(
            self.state,
            SequenceState::Idle | SequenceState::Running { .. }
        ) {
            self.state = SequenceState::Cancelled;
        }
    }

    fn is_live(&self) -> bool {
        matches!(
            self.state,
            SequenceState::Idle | SequenceState::Running { .. }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/engine.rs"]
mod tests;
