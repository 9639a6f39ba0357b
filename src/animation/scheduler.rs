//! Animation scheduler - FIFO playback of queued steps.
//!
//! Each step moves through `Queued -> Playing -> Completed -> Removed`,
//! driven entirely by an explicit [`tick`](AnimationScheduler::tick) call.
//! Completed steps are handed back to the caller, which applies their side
//! effects exactly once; the scheduler itself never touches the tree.

use std::collections::VecDeque;

use crate::animation::{AnimationStep, SchedulerStats};
use crate::common::{Key, Position};

/// Plays queued animation steps one at a time, in arrival order.
///
/// # Ordering
/// `active` holds the steps currently playing. The type supports several,
/// but admission is one-at-a-time: the head of `pending` is promoted only
/// when `active` has drained. Completion order therefore equals enqueue
/// order regardless of step durations, which is what guarantees that two
/// queued logical mutations apply to the tree in the order they were
/// requested.
///
/// # Cancellation
/// There is none. Progress only moves forward, so every enqueued step
/// eventually completes; the only way to drop steps is a full
/// [`clear`](Self::clear) as part of a whole-engine reset.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    /// Steps waiting to play, in arrival order (front = next).
    pending: VecDeque<AnimationStep>,

    /// Steps currently playing.
    active: Vec<AnimationStep>,

    /// Set when any step finished during the latest tick; consumed by
    /// [`take_just_completed`](Self::take_just_completed).
    just_completed: bool,

    /// Playback counters.
    stats: SchedulerStats,
}

impl AnimationScheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a step for playback after everything already queued.
    pub fn enqueue(&mut self, mut step: AnimationStep) {
        step.reset();
        self.stats.steps_enqueued += 1;
        self.pending.push_back(step);
    }

    /// Advance playback by `dt` seconds.
    ///
    /// Admits the head of the queue if nothing is playing, advances every
    /// active step, and returns the steps whose progress reached 1 this
    /// tick, in completion order. The caller applies each returned step's
    /// side effect; a step is returned exactly once.
    pub fn tick(&mut self, dt: f32) -> Vec<AnimationStep> {
        self.stats.ticks += 1;

        // Admit first so a step enqueued while idle starts advancing on
        // this very tick, not the next one.
        if self.active.is_empty() {
            if let Some(mut step) = self.pending.pop_front() {
                step.reset();
                self.active.push(step);
            }
        }

        for step in &mut self.active {
            step.advance(dt);
        }

        let (done, still_playing): (Vec<_>, Vec<_>) = self
            .active
            .drain(..)
            .partition(AnimationStep::is_complete);
        self.active = still_playing;

        if !done.is_empty() {
            self.just_completed = true;
            self.stats.steps_completed += done.len() as u64;
            tracing::trace!("{} step(s) completed this tick", done.len());
        }
        done
    }

    /// Refresh the landing position of active flights flagged for
    /// recalculation.
    ///
    /// `resolve` maps a moving key to its current layout target; returning
    /// `None` leaves the previous target in place.
    pub fn recalculate_targets(&mut self, mut resolve: impl FnMut(Key) -> Option<Position>) {
        for step in &mut self.active {
            if let Some(key) = step.recalculating_key() {
                if let Some(target) = resolve(key) {
                    step.retarget(target);
                }
            }
        }
    }

    /// Whether any step is queued or playing.
    #[inline]
    pub fn is_animating(&self) -> bool {
        !self.pending.is_empty() || !self.active.is_empty()
    }

    /// The steps currently playing, for the renderer.
    #[inline]
    pub fn active(&self) -> &[AnimationStep] {
        &self.active
    }

    /// Number of steps waiting to play.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether a step completed since the last call; reading resets it.
    pub fn take_just_completed(&mut self) -> bool {
        std::mem::take(&mut self.just_completed)
    }

    /// Playback counters.
    #[inline]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Drop every queued and playing step.
    ///
    /// Steps can hold node handles, so a whole-engine reset must not leave
    /// them behind pointing into a cleared arena.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.active.clear();
        self.just_completed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{StepKind, TreeOperation};

    fn op_step(key: Key, duration: f32) -> AnimationStep {
        AnimationStep::new(
            StepKind::NodeOperation {
                key,
                operation: TreeOperation::None,
            },
            duration,
        )
        .unwrap()
    }

    fn step_key(step: &AnimationStep) -> Key {
        match step.kind() {
            StepKind::NodeOperation { key, .. } => *key,
            other => panic!("unexpected step kind {other:?}"),
        }
    }

    #[test]
    fn test_idle_scheduler() {
        let mut scheduler = AnimationScheduler::new();
        assert!(!scheduler.is_animating());
        assert!(scheduler.tick(0.1).is_empty());
        assert!(!scheduler.take_just_completed());
    }

    #[test]
    fn test_single_step_lifecycle() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.enqueue(op_step(1, 1.0));
        assert!(scheduler.is_animating());

        for _ in 0..4 {
            assert!(scheduler.tick(0.2).is_empty());
            assert_eq!(scheduler.active().len(), 1);
        }
        let done = scheduler.tick(0.2);
        assert_eq!(done.len(), 1);
        assert!(done[0].is_complete());
        assert!(!scheduler.is_animating());
        assert!(scheduler.take_just_completed());
        assert!(!scheduler.take_just_completed()); // consumed on read
    }

    #[test]
    fn test_fifo_order_beats_duration_order() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.enqueue(op_step(1, 10.0)); // long step first
        scheduler.enqueue(op_step(2, 0.1)); // short step second

        let mut completed = Vec::new();
        let mut guard = 0;
        while scheduler.is_animating() {
            completed.extend(scheduler.tick(1.0).iter().map(step_key));
            guard += 1;
            assert!(guard < 100, "scheduler failed to drain");
        }
        assert_eq!(completed, vec![1, 2]);
    }

    #[test]
    fn test_at_most_one_active_step() {
        let mut scheduler = AnimationScheduler::new();
        for key in 0..5 {
            scheduler.enqueue(op_step(key, 1.0));
        }
        assert_eq!(scheduler.active().len(), 0);
        assert_eq!(scheduler.pending_len(), 5);

        scheduler.tick(0.1);
        assert_eq!(scheduler.active().len(), 1);
        assert_eq!(scheduler.pending_len(), 4);

        // Still only one in flight while the head plays out.
        scheduler.tick(0.1);
        assert_eq!(scheduler.active().len(), 1);
        assert_eq!(scheduler.pending_len(), 4);
    }

    #[test]
    fn test_progress_clamped_on_oversized_dt() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.enqueue(op_step(1, 0.5));
        let done = scheduler.tick(100.0);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].progress(), 1.0);
    }

    #[test]
    fn test_stats_track_lifecycle() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.enqueue(op_step(1, 0.1));
        scheduler.enqueue(op_step(2, 0.1));
        assert_eq!(scheduler.stats().steps_enqueued, 2);

        while scheduler.is_animating() {
            scheduler.tick(0.1);
        }
        let stats = scheduler.stats();
        assert_eq!(stats.steps_completed, 2);
        assert_eq!(stats.in_flight(), 0);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.enqueue(op_step(1, 1.0));
        scheduler.enqueue(op_step(2, 1.0));
        scheduler.tick(0.1);

        scheduler.clear();
        assert!(!scheduler.is_animating());
        assert_eq!(scheduler.active().len(), 0);
        assert_eq!(scheduler.pending_len(), 0);
    }
}
