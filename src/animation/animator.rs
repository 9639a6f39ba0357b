//! Tree animator - the animated mutation front end.
//!
//! [`TreeAnimator`] owns the tree, the scheduler, and the layout cache, and
//! turns insert/erase requests into queued animation steps instead of
//! immediate mutations. The real structural change happens when the step
//! that carries it completes, so callers see the tree update exactly when
//! the visual lands.

use crate::animation::{
    AnimationScheduler, AnimationStep, HighlightColor, KeyLayout, SchedulerStats, StepKind,
    TreeOperation,
};
use crate::common::config::{
    DEFAULT_MIN_DEGREE, HIGHLIGHT_DURATION, KEY_MOVE_DURATION, NODE_OPERATION_DURATION,
    SPLIT_DURATION,
};
use crate::common::{Key, NodeId, Position, Result};
use crate::tree::{BTree, InsertEvent};

/// Animated B-tree engine.
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────────────────┐
/// │                       TreeAnimator                        │
/// │  ┌─────────────┐  ┌──────────────────┐  ┌─────────────┐   │
/// │  │    BTree    │  │AnimationScheduler│  │  KeyLayout  │   │
/// │  │ (structure) │  │ (pending/active) │  │ (positions) │   │
/// │  └─────────────┘  └──────────────────┘  └─────────────┘   │
/// └───────────────────────────────────────────────────────────┘
///     ▲ input: insert/erase (animated or immediate)
///     ▼ renderer: traverse + active steps + position feed, tick(dt)
/// ```
///
/// # Deferred execution
/// `insert_animated`/`erase_animated` return immediately after queueing
/// steps; the mutation completes asynchronously across future
/// [`tick`](Self::tick) calls. Because the scheduler plays one step at a
/// time in arrival order, queued mutations apply to the tree in request
/// order, never interleaved.
///
/// # The split asymmetry
/// When an animated insert commits, any splits it causes are applied to the
/// tree immediately (the algorithm needs the post-split shape to keep
/// descending) but their replay steps queue up afterwards. Only the key
/// placement itself and the erase rebuild wait for their step to finish.
///
/// # Gating
/// Collaborators are expected to hold new structural commands while
/// [`is_animating`](Self::is_animating) is true. The engine does not
/// re-validate this; a caller that bypasses the gate gives up the ordering
/// guarantee, not memory safety.
#[derive(Debug)]
pub struct TreeAnimator {
    tree: BTree,
    scheduler: AnimationScheduler,
    layout: KeyLayout,
}

impl TreeAnimator {
    /// Create an animator around an empty tree of the given degree.
    ///
    /// # Errors
    /// Returns [`Error::InvalidMinDegree`](crate::Error::InvalidMinDegree)
    /// if `min_degree < 2`.
    pub fn new(min_degree: usize) -> Result<Self> {
        Ok(Self {
            tree: BTree::new(min_degree)?,
            scheduler: AnimationScheduler::new(),
            layout: KeyLayout::new(),
        })
    }

    /// Create an animator with the default degree,
    /// [`DEFAULT_MIN_DEGREE`].
    pub fn with_default_degree() -> Self {
        match Self::new(DEFAULT_MIN_DEGREE) {
            Ok(animator) => animator,
            Err(_) => unreachable!("the default degree is supported"),
        }
    }

    // ========================================================================
    // Public API: Immediate mutations
    // ========================================================================

    /// Insert `k` right now, without animation.
    pub fn insert(&mut self, k: Key) {
        self.tree.insert(k);
    }

    /// Erase `k` right now, without animation. No-op if absent.
    pub fn erase(&mut self, k: Key) -> bool {
        let removed = self.tree.erase(k);
        if removed {
            self.tree.collapse_root();
        }
        removed
    }

    /// Drop the tree, the insertion log, the layout cache, and every queued
    /// or playing step: a full reset.
    pub fn clear_all(&mut self) {
        self.tree.clear_all();
        self.scheduler.clear();
        self.layout.clear();
    }

    // ========================================================================
    // Public API: Animated mutations
    // ========================================================================

    /// Queue an animated insert of `k` and return immediately.
    ///
    /// One key flight is queued: `k` travels from the spawn point to its
    /// predicted landing slot over [`KEY_MOVE_DURATION`] seconds, retargeted
    /// each tick while earlier steps reshape the tree. The real insertion
    /// runs when the flight lands; splits it causes queue their own replay
    /// steps in root-to-leaf order.
    ///
    /// # Errors
    /// Step construction errors, which cannot occur with the configured
    /// durations.
    pub fn insert_animated(&mut self, k: Key) -> Result<()> {
        let flight = AnimationStep::new(
            StepKind::KeyMoving {
                key: k,
                from: KeyLayout::spawn_point(),
                to: self.layout.predicted_target(k),
                operation: TreeOperation::InsertKey,
                needs_recalculation: true,
            },
            KEY_MOVE_DURATION,
        )?;
        self.scheduler.enqueue(flight);
        tracing::debug!("queued animated insert of {k}");
        Ok(())
    }

    /// Queue an animated erase of `k`, returning whether `k` was found.
    ///
    /// Absent keys are a silent no-op. Otherwise three steps queue in
    /// order: a highlight flash on the located key, a fly-away of the key
    /// toward the spawn point, and the operation step whose completion runs
    /// the real rebuild (followed, if the rebuild ever leaves an empty
    /// root, by a rebalance step around the synchronous root promotion).
    ///
    /// # Errors
    /// Step construction errors, which cannot occur with the configured
    /// durations.
    pub fn erase_animated(&mut self, k: Key) -> Result<bool> {
        let Some((node, key_index)) = self.tree.locate(k) else {
            return Ok(false);
        };

        let flash = AnimationStep::new(
            StepKind::KeyHighlight {
                node,
                key_index,
                color: HighlightColor::Target,
            },
            HIGHLIGHT_DURATION,
        )?;
        let fly_away = AnimationStep::new(
            StepKind::KeyMoving {
                key: k,
                from: self.layout.predicted_target(k),
                to: KeyLayout::spawn_point(),
                operation: TreeOperation::DeleteKey,
                needs_recalculation: false,
            },
            KEY_MOVE_DURATION,
        )?;
        let commit = AnimationStep::new(
            StepKind::NodeOperation {
                key: k,
                operation: TreeOperation::DeleteKey,
            },
            NODE_OPERATION_DURATION,
        )?;

        self.scheduler.enqueue(flash);
        self.scheduler.enqueue(fly_away);
        self.scheduler.enqueue(commit);
        tracing::debug!("queued animated erase of {k}");
        Ok(true)
    }

    /// Advance playback by `dt` seconds and apply the side effects of every
    /// step that completed.
    ///
    /// Called once per rendering frame. After effects run, in-flight key
    /// targets flagged for recalculation are refreshed from the layout.
    ///
    /// # Errors
    /// Step construction errors from replay steps, which cannot occur with
    /// the configured durations.
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        let completed = self.scheduler.tick(dt);
        for step in completed {
            self.apply_completion(&step)?;
        }

        let layout = &self.layout;
        self.scheduler
            .recalculate_targets(|key| Some(layout.predicted_target(key)));
        Ok(())
    }

    // ========================================================================
    // Public API: Queries and renderer surface
    // ========================================================================

    /// Whether `k` is present in the tree.
    pub fn contains(&self, k: Key) -> bool {
        self.tree.contains(k)
    }

    /// Whether the tree holds any keys.
    pub fn has_keys(&self) -> bool {
        self.tree.has_keys()
    }

    /// The most recently inserted key still present.
    pub fn last_inserted_key(&self) -> Option<Key> {
        self.tree.last_inserted_key()
    }

    /// Whether any step is queued or playing.
    ///
    /// Collaborators use this as the input gate: structural commands are
    /// held while it returns true.
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_animating()
    }

    /// The steps currently playing, for drawing in-flight effects.
    pub fn current_animation_steps(&self) -> &[AnimationStep] {
        self.scheduler.active()
    }

    /// Whether a step completed since the last call; reading resets it.
    pub fn take_just_completed(&mut self) -> bool {
        self.scheduler.take_just_completed()
    }

    /// In-order walk of the tree; see [`BTree::traverse`].
    pub fn traverse(&self, visit: impl FnMut(NodeId, usize, usize)) {
        self.tree.traverse(visit);
    }

    /// Read access to the underlying tree.
    pub fn tree(&self) -> &BTree {
        &self.tree
    }

    /// Playback counters.
    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Record where the renderer drew the key at `key_index` of `node`.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_key_position(&mut self, node: NodeId, key_index: usize, position: Position) {
        if let Some(&key) = self.tree.node(node).keys().get(key_index) {
            self.layout.set(key, position);
        }
    }

    /// Where `k` is (or is predicted to land), in layout space.
    pub fn target_position_for(&self, k: Key) -> Position {
        self.layout.predicted_target(k)
    }

    // ========================================================================
    // Internal: Completion side effects
    // ========================================================================

    /// Apply the structural mutation a completed step stands for.
    ///
    /// Runs exactly once per step: the scheduler hands each completed step
    /// back a single time.
    fn apply_completion(&mut self, step: &AnimationStep) -> Result<()> {
        match step.kind() {
            StepKind::KeyMoving {
                key,
                operation: TreeOperation::InsertKey,
                ..
            } => self.commit_insert(*key),
            StepKind::NodeOperation {
                key,
                operation: TreeOperation::DeleteKey,
            } => self.commit_erase(*key),
            // Highlights, split/merge replays, and plain moves are visual
            // only; the mutation they illustrate already happened.
            _ => Ok(()),
        }
    }

    /// Run the real insertion and queue replay steps for what it did.
    fn commit_insert(&mut self, k: Key) -> Result<()> {
        let mut events = Vec::new();
        self.tree.insert_with(k, &mut |event| events.push(event));
        tracing::debug!("committed insert of {k} ({} split event(s))", events.len());

        for event in events {
            let step = match event {
                InsertEvent::NodeOverflow { node } => AnimationStep::new(
                    StepKind::KeyHighlight {
                        node,
                        key_index: self.tree.min_degree() - 1,
                        color: HighlightColor::Violation,
                    },
                    HIGHLIGHT_DURATION,
                )?,
                InsertEvent::NodeSplit {
                    node,
                    promoted,
                    left_keys,
                    right_keys,
                    new_node,
                } => AnimationStep::new(
                    StepKind::NodeSplitting {
                        node,
                        promoted,
                        left_keys,
                        right_keys,
                        new_node,
                    },
                    SPLIT_DURATION,
                )?,
            };
            self.scheduler.enqueue(step);
        }
        Ok(())
    }

    /// Run the real rebuild erase, promoting a hollowed-out root if the
    /// rebuild ever produces one.
    fn commit_erase(&mut self, k: Key) -> Result<()> {
        self.tree.erase(k);
        tracing::debug!("committed erase of {k}");

        if self.tree.collapse_root() {
            let rebalance = AnimationStep::new(
                StepKind::NodeOperation {
                    key: k,
                    operation: TreeOperation::BalanceTree,
                },
                NODE_OPERATION_DURATION,
            )?;
            self.scheduler.enqueue(rebalance);
        }
        Ok(())
    }
}

impl Default for TreeAnimator {
    fn default() -> Self {
        Self::with_default_degree()
    }
}
