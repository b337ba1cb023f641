//! Deterministic virtual clock implementing [`Scheduler`].
//!
//! Timers are ordered by `(due, scheduling sequence)`, so two timers due at
//! the same instant fire in the order they were scheduled.

use std::collections::{BTreeMap, HashMap};

use crate::{
    foundation::core::Millis,
    foundation::error::{MotionError, MotionResult},
    schedule::timer::{FiredTimer, OwnerId, Scheduler, TimerId},
};

/// Deterministic [`Scheduler`] driven by explicit time advances.
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Millis,
    next_seq: u64,
    queue: BTreeMap<(Millis, u64), OwnerId>,
    due_of: HashMap<TimerId, Millis>,
}

impl VirtualClock {
    /// Clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at `now` instead of zero.
    pub fn starting_at(now: Millis) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of pending timers owned by `owner`.
    pub fn pending_for(&self, owner: OwnerId) -> usize {
        self.queue.values().filter(|o| **o == owner).count()
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its due time (never backwards).
    pub fn pop_due(&mut self, until: Millis) -> Option<FiredTimer> {
        let (&(due, seq), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        let owner = self.queue.remove(&(due, seq))?;
        let id = TimerId(seq);
        self.due_of.remove(&id);
        self.now = self.now.max(due);
        Some(FiredTimer { id, owner, due })
    }

    /// Move the clock to `t` after all due timers were popped.
    pub fn settle(&mut self, t: Millis) -> MotionResult<()> {
        if t < self.now {
            return Err(MotionError::schedule(format!(
                "cannot move clock backwards from {} to {t}",
                self.now
            )));
        }
        self.now = t;
        Ok(())
    }

    /// Pop every timer due by `t` in order, then settle at `t`.
    ///
    /// Only useful when no handler reschedules; owners that react to firings
    /// should drive [`VirtualClock::pop_due`] themselves.
    pub fn drain_until(&mut self, t: Millis) -> MotionResult<Vec<FiredTimer>> {
        if t < self.now {
            return Err(MotionError::schedule(format!(
                "cannot move clock backwards from {} to {t}",
                self.now
            )));
        }
        let mut fired = Vec::new();
        while let Some(f) = self.pop_due(t) {
            fired.push(f);
        }
        self.settle(t)?;
        Ok(fired)
    }

    /// Drop every pending timer of `owner`; returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: OwnerId) -> usize {
        let keys: Vec<(Millis, u64)> = self
            .queue
            .iter()
            .filter(|(_, o)| **o == owner)
            .map(|(k, _)| *k)
            .collect();
        for key in &keys {
            self.queue.remove(key);
            self.due_of.remove(&TimerId(key.1));
        }
        keys.len()
    }
}

impl Scheduler for VirtualClock {
    fn now(&self) -> Millis {
        self.now
    }

    fn schedule_at(&mut self, due: Millis, owner: OwnerId) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = due.max(self.now);
        self.queue.insert((due, seq), owner);
        let id = TimerId(seq);
        self.due_of.insert(id, due);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        match self.due_of.remove(&id) {
            Some(due) => self.queue.remove(&(due, id.0)).is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/clock.rs"]
mod tests;
