//! Scheduler statistics tracking.

use std::fmt;

/// Counters tracked by the animation scheduler.
///
/// Plain fields: all scheduler state is mutated from the single cooperative
/// tick loop. Copy the struct out via [`AnimationScheduler::stats`] for
/// display or assertions.
///
/// [`AnimationScheduler::stats`]: super::AnimationScheduler::stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerStats {
    /// Steps ever accepted into the pending queue.
    pub steps_enqueued: u64,

    /// Steps that reached full progress and were handed back.
    pub steps_completed: u64,

    /// Tick calls processed.
    pub ticks: u64,
}

impl SchedulerStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps enqueued but not yet completed.
    pub fn in_flight(&self) -> u64 {
        self.steps_enqueued - self.steps_completed
    }
}

impl fmt::Display for SchedulerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ enqueued: {}, completed: {}, in flight: {}, ticks: {} }}",
            self.steps_enqueued,
            self.steps_completed,
            self.in_flight(),
            self.ticks
        )
    }
}
