use crate::foundation::core::Millis;

/// Handle to one scheduled callback.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Handle of one scheduled timer.
#[serde(transparent)]
pub struct TimerId(pub u64);

/// Identity of the component that owns a timer; used to route firings.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Component a timer belongs to; firings are routed by it.
#[serde(transparent)]
pub struct OwnerId(pub u32);

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    /// Timer that fired.
    pub id: TimerId,
    /// Component it belongs to.
    pub owner: OwnerId,
    /// Time it was scheduled for.
    pub due: Millis,
}

/// The host scheduling primitive: "call me back at (or after) this time".
///
/// Implementations are single-threaded. Callbacks are not closures; a firing
/// is reported back to the owner identified by [`OwnerId`], which then checks
/// the [`TimerId`] against the one it is waiting for.
pub trait Scheduler {
    /// Current time on this scheduler's clock.
    fn now(&self) -> Millis;

    /// Schedule a firing at the absolute time `due`. A `due` in the past fires
    /// at the next opportunity.
    fn schedule_at(&mut self, due: Millis, owner: OwnerId) -> TimerId;

    /// Cancel a pending timer. Returns `false` when it already fired or was
    /// cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Schedule a firing `delay` after [`Scheduler::now`].
    fn schedule_after(&mut self, delay: Millis, owner: OwnerId) -> TimerId {
        let due = self.now().saturating_add(delay);
        self.schedule_at(due, owner)
    }
}

/// The single outstanding timer of a component.
///
/// Re-arming always cancels the previous timer first, so a slot never holds
/// more than one live timer.
#[derive(Clone, Copy, Debug)]
pub struct TimerSlot {
    owner: OwnerId,
    pending: Option<TimerId>,
}

impl TimerSlot {
    /// Empty slot whose timers carry `owner`.
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            pending: None,
        }
    }

    /// Owner stamped on every timer of this slot.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Timer currently armed, if any.
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Replace any pending timer with one due at `due`.
    pub fn arm_at(&mut self, sched: &mut dyn Scheduler, due: Millis) -> TimerId {
        self.cancel(sched);
        let id = sched.schedule_at(due, self.owner);
        tracing::trace!(owner = self.owner.0, timer = id.0, due = due.0, "timer armed");
        self.pending = Some(id);
        id
    }

    /// Replace any pending timer with one due `delay` from now.
    pub fn arm_after(&mut self, sched: &mut dyn Scheduler, delay: Millis) -> TimerId {
        let due = sched.now().saturating_add(delay);
        self.arm_at(sched, due)
    }

    /// Consume the pending timer if `id` is the one this slot is waiting for.
    /// Stale or foreign ids return `false` and leave the slot untouched.
    pub fn take(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancel the pending timer, if any.
    pub fn cancel(&mut self, sched: &mut dyn Scheduler) {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
    }
}
