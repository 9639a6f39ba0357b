//! Animation layer - timed playback of tree mutations.
//!
//! # Components
//! - [`TreeAnimator`] - the animated mutation front end owning everything
//! - [`AnimationScheduler`] - FIFO playback of queued steps
//! - [`AnimationStep`] / [`StepKind`] - one timed visual transition
//! - [`KeyLayout`] - renderer-fed key positions
//! - [`SchedulerStats`] - playback counters

mod animator;
mod layout;
mod scheduler;
mod stats;
mod step;

pub use animator::TreeAnimator;
pub use layout::KeyLayout;
pub use scheduler::AnimationScheduler;
pub use stats::SchedulerStats;
pub use step::{AnimationStep, HighlightColor, StepKind, TreeOperation};
