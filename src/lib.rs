//! treestage - an animated B-tree engine.
//!
//! A B-tree whose structural mutations play back as discrete, timed visual
//! steps instead of atomic calls. The scheduler is not a replay of a
//! finished computation: it is threaded through the algorithm itself, so a
//! key insertion, a node overflow, a split, or a delete each become their
//! own step, and the real mutation fires the instant its step completes.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         treestage                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │            Animation Layer (animation/)             │    │
//! │  │   TreeAnimator → AnimationScheduler → AnimationStep │    │
//! │  │           (+ KeyLayout position cache)              │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! │                            ↓                                │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │                Tree Layer (tree/)                   │    │
//! │  │        BTree → Node, NodeArena, InsertEvent         │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! │                            ↓                                │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │              Primitives (common/)                   │    │
//! │  │     Key, NodeId, Position, Error, config            │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The renderer and input handler sit outside this crate: the renderer
//! reads [`TreeAnimator::traverse`] and
//! [`TreeAnimator::current_animation_steps`] each frame and feeds key
//! positions back via [`TreeAnimator::set_key_position`]; the input layer
//! issues mutations and drives [`TreeAnimator::tick`].
//!
//! # Quick Start
//! ```
//! use treestage::TreeAnimator;
//!
//! let mut animator = TreeAnimator::new(3)?;
//!
//! // Queue an animated insert; the tree mutates when the flight lands.
//! animator.insert_animated(42)?;
//! assert!(!animator.contains(42));
//!
//! while animator.is_animating() {
//!     animator.tick(0.2)?;
//! }
//! assert!(animator.contains(42));
//! # Ok::<(), treestage::Error>(())
//! ```

// Core modules
pub mod animation;
pub mod common;
pub mod tree;

// Re-export commonly used items at crate root for convenience
pub use common::{Error, Key, NodeId, Position, Result};

pub use animation::{
    AnimationScheduler, AnimationStep, HighlightColor, SchedulerStats, StepKind, TreeAnimator,
    TreeOperation,
};
pub use tree::{BTree, InsertEvent, Node};
