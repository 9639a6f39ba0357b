//! Animation step - a timed description of one visual transition.

use crate::common::{Error, Key, NodeId, Position, Result};

/// The structural mutation a step stands for, if any.
///
/// Steps tagged [`InsertKey`](TreeOperation::InsertKey) or
/// [`DeleteKey`](TreeOperation::DeleteKey) carry the real mutation: the tree
/// changes the moment such a step completes, not before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOperation {
    InsertKey,
    DeleteKey,
    SplitNode,
    MergeNode,
    BalanceTree,
    None,
}

/// Highlight palette entry for key/node flashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightColor {
    /// A node at key capacity, about to split.
    Violation,
    /// The key an erase is aimed at.
    Target,
}

/// What kind of transition a step describes, with only the data that kind
/// needs.
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    /// A key in flight between two layout points.
    KeyMoving {
        key: Key,
        from: Position,
        to: Position,
        /// The mutation to apply when the flight lands, or
        /// [`TreeOperation::None`] for a purely visual move.
        operation: TreeOperation,
        /// Recompute `to` from the live layout every tick: the landing slot
        /// shifts while earlier queued splits are still replaying.
        needs_recalculation: bool,
    },

    /// Replay of a node split: `node` kept `left_keys`, `new_node` took
    /// `right_keys`, and `promoted` moved into the parent.
    NodeSplitting {
        node: NodeId,
        promoted: Key,
        left_keys: Vec<Key>,
        right_keys: Vec<Key>,
        new_node: NodeId,
    },

    /// Replay of two nodes merging into one.
    NodeMerging {
        node: NodeId,
        absorbed_keys: Vec<Key>,
    },

    /// Flash on one key slot of a node.
    KeyHighlight {
        node: NodeId,
        key_index: usize,
        color: HighlightColor,
    },

    /// A generic operation on the tree keyed by `key`.
    NodeOperation { key: Key, operation: TreeOperation },
}

/// One timed visual transition.
///
/// A step is pure data plus progress bookkeeping: it is enqueued, played by
/// the scheduler (`progress` advancing `0 → 1` over `duration` seconds), and
/// handed back to the caller exactly once when it completes so the caller
/// can apply whatever mutation it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationStep {
    kind: StepKind,
    duration: f32,
    progress: f32,
    completed: bool,
}

impl AnimationStep {
    /// Create a step with `progress = 0`.
    ///
    /// # Errors
    /// Returns [`Error::NonPositiveDuration`] unless `duration > 0`.
    pub fn new(kind: StepKind, duration: f32) -> Result<Self> {
        if duration <= 0.0 {
            return Err(Error::NonPositiveDuration(duration));
        }
        Ok(Self {
            kind,
            duration,
            progress: 0.0,
            completed: false,
        })
    }

    /// The transition this step describes.
    #[inline]
    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    /// Playback length in seconds.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Playback progress in `[0, 1]`.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether progress has reached 1.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Advance playback by `dt` seconds, clamping progress to 1.
    pub(super) fn advance(&mut self, dt: f32) {
        if self.completed {
            return;
        }
        self.progress = (self.progress + dt / self.duration).min(1.0);
        if self.progress >= 1.0 {
            self.completed = true;
        }
    }

    /// Rewind to the start of playback.
    pub(super) fn reset(&mut self) {
        self.progress = 0.0;
        self.completed = false;
    }

    /// The key whose target should be refreshed from the live layout, if
    /// this is a recalculating flight.
    pub(super) fn recalculating_key(&self) -> Option<Key> {
        match self.kind {
            StepKind::KeyMoving {
                key,
                needs_recalculation: true,
                ..
            } => Some(key),
            _ => None,
        }
    }

    /// Point the flight at a new landing position.
    pub(super) fn retarget(&mut self, target: Position) {
        if let StepKind::KeyMoving { to, .. } = &mut self.kind {
            *to = target;
        }
    }

    /// Where a moving key currently is, interpolated by progress.
    ///
    /// `None` for step kinds that do not move a key.
    pub fn current_position(&self) -> Option<Position> {
        match self.kind {
            StepKind::KeyMoving { from, to, .. } => Some(from.lerp(to, self.progress)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight() -> AnimationStep {
        AnimationStep::new(
            StepKind::KeyMoving {
                key: 5,
                from: Position::new(0.0, 0.0),
                to: Position::new(100.0, 0.0),
                operation: TreeOperation::InsertKey,
                needs_recalculation: true,
            },
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let kind = StepKind::NodeOperation {
            key: 1,
            operation: TreeOperation::None,
        };
        assert!(matches!(
            AnimationStep::new(kind.clone(), 0.0),
            Err(Error::NonPositiveDuration(_))
        ));
        assert!(matches!(
            AnimationStep::new(kind, -1.0),
            Err(Error::NonPositiveDuration(_))
        ));
    }

    #[test]
    fn test_advance_clamps_and_completes() {
        let mut step = flight();
        assert_eq!(step.duration(), 1.0);
        step.advance(0.4);
        assert!((step.progress() - 0.4).abs() < 1e-6);
        assert!(!step.is_complete());

        step.advance(10.0);
        assert_eq!(step.progress(), 1.0);
        assert!(step.is_complete());
    }

    #[test]
    fn test_reset() {
        let mut step = flight();
        step.advance(2.0);
        step.reset();
        assert_eq!(step.progress(), 0.0);
        assert!(!step.is_complete());
    }

    #[test]
    fn test_current_position_interpolates() {
        let mut step = flight();
        step.advance(0.5);
        assert_eq!(step.current_position(), Some(Position::new(50.0, 0.0)));
    }

    #[test]
    fn test_retarget_moves_destination() {
        let mut step = flight();
        assert_eq!(step.recalculating_key(), Some(5));
        step.retarget(Position::new(40.0, 80.0));
        step.advance(1.0);
        assert_eq!(step.current_position(), Some(Position::new(40.0, 80.0)));
    }
}
