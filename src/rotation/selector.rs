use crate::{
    foundation::core::Millis,
    foundation::error::{MotionError, MotionResult},
    schedule::lifecycle::Lifecycle,
    schedule::timer::{OwnerId, Scheduler, TimerId, TimerSlot},
};

/// Testimonial carousel defaults.
pub const TESTIMONIAL_COUNT: usize = 3;
/// Time each testimonial stays on screen.
pub const TESTIMONIAL_PERIOD: Millis = Millis(8000);
/// Featured project showcase period.
pub const PROJECT_PERIOD: Millis = Millis(5000);

/// Cycles an active index through `len` items every `period`.
///
/// Manual selection is immediate and restarts the rotation window, so the next
/// automatic advance happens a full period after the selection.
#[derive(Debug)]
pub struct AutoRotator {
    len: usize,
    period: Millis,
    active: usize,
    slot: TimerSlot,
    running: bool,
    torn_down: bool,
}

impl AutoRotator {
    /// Build an idle rotator over `len` items. Fails on zero items or a zero
    /// period.
    pub fn new(owner: OwnerId, len: usize, period: Millis) -> MotionResult<Self> {
        if len == 0 {
            return Err(MotionError::validation("rotator needs at least one item"));
        }
        if period.is_zero() {
            return Err(MotionError::validation("rotator period must be > 0"));
        }
        Ok(Self {
            len,
            period,
            active: 0,
            slot: TimerSlot::new(owner),
            running: false,
            torn_down: false,
        })
    }

    /// Index of the item currently shown.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a rotator has at least one item.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Time each item stays active.
    pub fn period(&self) -> Millis {
        self.period
    }

    /// Timer of the next automatic advance, if one is scheduled.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.slot.pending()
    }

    /// Advances on an owned timer. Returns the new index.
    pub fn on_timer(&mut self, id: TimerId, sched: &mut dyn Scheduler) -> Option<usize> {
        if !self.slot.take(id) || !self.running {
            return None;
        }
        self.active = (self.active + 1) % self.len;
        tracing::debug!(owner = self.slot.owner().0, index = self.active, "rotate");
        self.slot.arm_after(sched, self.period);
        Some(self.active)
    }

    /// Show item `index` now and restart the rotation window.
    pub fn select(&mut self, index: usize, sched: &mut dyn Scheduler) -> MotionResult<()> {
        if index >= self.len {
            return Err(MotionError::animation(format!(
                "rotator index {index} out of range (len {})",
                self.len
            )));
        }
        if self.torn_down {
            return Err(MotionError::animation("rotator was torn down"));
        }
        self.active = index;
        if self.running {
            self.slot.arm_after(sched, self.period);
        }
        Ok(())
    }

    /// Step forward one item, wrapping past the end. Returns the new index.
    pub fn select_next(&mut self, sched: &mut dyn Scheduler) -> MotionResult<usize> {
        let index = (self.active + 1) % self.len;
        self.select(index, sched)?;
        Ok(index)
    }

    /// Step back one item, wrapping before the start. Returns the new index.
    pub fn select_prev(&mut self, sched: &mut dyn Scheduler) -> MotionResult<usize> {
        let index = (self.active + self.len - 1) % self.len;
        self.select(index, sched)?;
        Ok(index)
    }
}

impl Lifecycle for AutoRotator {
    fn start(&mut self, sched: &mut dyn Scheduler) -> MotionResult<()> {
        if self.torn_down || self.running {
            return Err(MotionError::animation("rotator already started"));
        }
        self.running = true;
        self.slot.arm_after(sched, self.period);
        Ok(())
    }

    fn teardown(&mut self, sched: &mut dyn Scheduler) {
        self.slot.cancel(sched);
        self.running = false;
        self.torn_down = true;
    }

    fn is_live(&self) -> bool {
        !self.torn_down
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rotation/selector.rs"]
mod tests;
