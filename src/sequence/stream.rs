use std::collections::VecDeque;

use crate::{
    foundation::core::Millis,
    foundation::error::{MotionError, MotionResult},
    foundation::math::Rng64,
    schedule::lifecycle::Lifecycle,
    schedule::timer::{OwnerId, Scheduler, TimerId, TimerSlot},
};

/// Decorative scrolling column of random binary rows shown on the loader
/// panels. Every `interval` a fresh row is pushed on top and the oldest one
/// drops off.
#[derive(Debug)]
pub struct CodeStream {
    rows: VecDeque<String>,
    width: usize,
    interval: Millis,
    rng: Rng64,
    slot: TimerSlot,
    running: bool,
    torn_down: bool,
}

impl CodeStream {
    /// Blank stream of `rows` rows of `width` digits, refreshed every `interval`.
    pub fn new(
        owner: OwnerId,
        seed: u64,
        rows: usize,
        width: usize,
        interval: Millis,
    ) -> MotionResult<Self> {
        if rows == 0 || width == 0 {
            return Err(MotionError::validation(
                "code stream rows and width must be > 0",
            ));
        }
        if interval.is_zero() {
            return Err(MotionError::validation("code stream interval must be > 0"));
        }
        Ok(Self {
            rows: std::iter::repeat_n(String::new(), rows).collect(),
            width,
            interval,
            rng: Rng64::new(seed),
            slot: TimerSlot::new(owner),
            running: false,
            torn_down: false,
        })
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(String::as_str)
    }

    /// Timer of the next refresh.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.slot.pending()
    }

    fn next_row(&mut self) -> String {
        (0..self.width)
            .map(|_| if self.rng.next_bit() { '1' } else { '0' })
            .collect()
    }

    /// Returns `true` when the firing produced a new row.
    pub fn on_timer(&mut self, id: TimerId, sched: &mut dyn Scheduler) -> bool {
        if !self.slot.take(id) || !self.running {
            return false;
        }
        let row = self.next_row();
        self.rows.push_front(row);
        self.rows.pop_back();
        self.slot.arm_after(sched, self.interval);
        true
    }
}

impl Lifecycle for CodeStream {
    fn start(&mut self, sched: &mut dyn Scheduler) -> MotionResult<()> {
        if self.torn_down || self.running {
            return Err(MotionError::animation("code stream already started"));
        }
        self.running = true;
        self.slot.arm_after(sched, self.interval);
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
#[path = "../../tests/unit/sequence/stream.rs"]
mod tests;
