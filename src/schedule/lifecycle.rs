use crate::{foundation::error::MotionResult, schedule::timer::Scheduler};

/// Start/stop contract shared by every timed component.
///
/// `teardown` must leave no timer of the component pending; after it, any
/// late firing addressed to the component is ignored.
pub trait Lifecycle {
    /// Schedule the component's first timer. Fails if it already started or
    /// was torn down.
    fn start(&mut self, sched: &mut dyn Scheduler) -> MotionResult<()>;

    /// Cancel every pending timer and stop reacting. Idempotent.
    fn teardown(&mut self, sched: &mut dyn Scheduler);

    /// Whether the component may still react to timers.
    fn is_live(&self) -> bool;
}
