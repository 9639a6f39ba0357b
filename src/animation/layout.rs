//! Key layout cache - the renderer's positions, readable by the core.
//!
//! The renderer computes where every key sits on screen and hands those
//! positions in each frame. The core only ever reads them: to aim a key
//! flight at its landing slot, and to know where an erased key lifts off
//! from. Keys not laid out yet (a key still in flight toward its first
//! landing) get a predicted position from their nearest laid-out neighbors.

use std::collections::HashMap;

use crate::common::config::{KEY_SPACING, LAYOUT_ORIGIN_X, LAYOUT_ORIGIN_Y, SPAWN_X, SPAWN_Y};
use crate::common::{Key, Position};

/// Last-known screen position of every laid-out key.
#[derive(Debug, Default)]
pub struct KeyLayout {
    positions: HashMap<Key, Position>,
}

impl KeyLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed off-screen point keys spawn from and exit to.
    #[inline]
    pub fn spawn_point() -> Position {
        Position::new(SPAWN_X, SPAWN_Y)
    }

    /// Record where `key` is currently drawn.
    pub fn set(&mut self, key: Key, position: Position) {
        self.positions.insert(key, position);
    }

    /// Last known position of `key`, if it has been laid out.
    pub fn position_of(&self, key: Key) -> Option<Position> {
        self.positions.get(&key).copied()
    }

    /// Best guess at where `key` will land.
    ///
    /// An already laid-out key answers with its exact slot. Otherwise the
    /// prediction comes from the laid-out neighbors: midway between the
    /// closest keys on either side, one slot beyond the nearer neighbor at
    /// an edge, or the layout origin in an empty layout.
    pub fn predicted_target(&self, key: Key) -> Position {
        if let Some(exact) = self.position_of(key) {
            return exact;
        }

        let below = self
            .positions
            .iter()
            .filter(|(&k, _)| k < key)
            .max_by_key(|(&k, _)| k)
            .map(|(_, &p)| p);
        let above = self
            .positions
            .iter()
            .filter(|(&k, _)| k > key)
            .min_by_key(|(&k, _)| k)
            .map(|(_, &p)| p);

        match (below, above) {
            (Some(b), Some(a)) => b.lerp(a, 0.5),
            (Some(b), None) => Position::new(b.x + KEY_SPACING, b.y),
            (None, Some(a)) => Position::new(a.x - KEY_SPACING, a.y),
            (None, None) => Position::new(LAYOUT_ORIGIN_X, LAYOUT_ORIGIN_Y),
        }
    }

    /// Forget every recorded position.
    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_position_wins() {
        let mut layout = KeyLayout::new();
        layout.set(10, Position::new(140.0, 50.0));
        assert_eq!(layout.predicted_target(10), Position::new(140.0, 50.0));
    }

    #[test]
    fn test_prediction_between_neighbors() {
        let mut layout = KeyLayout::new();
        layout.set(10, Position::new(100.0, 130.0));
        layout.set(30, Position::new(200.0, 130.0));
        assert_eq!(layout.predicted_target(20), Position::new(150.0, 130.0));
    }

    #[test]
    fn test_prediction_beyond_edges() {
        let mut layout = KeyLayout::new();
        layout.set(10, Position::new(100.0, 50.0));

        let right = layout.predicted_target(99);
        assert_eq!(right, Position::new(100.0 + KEY_SPACING, 50.0));

        let left = layout.predicted_target(1);
        assert_eq!(left, Position::new(100.0 - KEY_SPACING, 50.0));
    }

    #[test]
    fn test_prediction_in_empty_layout() {
        let layout = KeyLayout::new();
        assert_eq!(
            layout.predicted_target(5),
            Position::new(LAYOUT_ORIGIN_X, LAYOUT_ORIGIN_Y)
        );
    }

    #[test]
    fn test_clear() {
        let mut layout = KeyLayout::new();
        layout.set(1, Position::new(1.0, 1.0));
        layout.clear();
        assert_eq!(layout.position_of(1), None);
    }
}
