//! Configuration constants for treestage.

/// Default minimum degree (`t`) for a new tree.
///
/// With `t = 3` every node holds at most `2t - 1 = 5` keys, which keeps
/// nodes wide enough to show multiway behavior while still splitting after a
/// handful of insertions. This matches the degree the visualizer ships with.
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// Smallest supported minimum degree.
///
/// `t = 2` is the 2-3-4 tree; anything below cannot satisfy the B-tree
/// shape constraints.
pub const MIN_SUPPORTED_DEGREE: usize = 2;

/// Duration of a key's flight from the spawn point to its landing slot, in
/// seconds. Also used for the fly-away on deletion.
pub const KEY_MOVE_DURATION: f32 = 1.0;

/// Duration of a key/node highlight flash, in seconds.
pub const HIGHLIGHT_DURATION: f32 = 0.4;

/// Duration of a node-split replay, in seconds.
pub const SPLIT_DURATION: f32 = 0.7;

/// Duration of a generic node operation step (delete commit, rebalance), in
/// seconds.
pub const NODE_OPERATION_DURATION: f32 = 0.5;

// Layout geometry. The renderer owns the real layout; these constants keep
// predicted landing positions in the same coordinate space it uses.

/// Vertical distance between tree levels.
pub const LEVEL_HEIGHT: f32 = 80.0;

/// Horizontal distance between adjacent key slots.
pub const KEY_SPACING: f32 = 40.0;

/// X coordinate of the first key slot.
pub const LAYOUT_ORIGIN_X: f32 = 100.0;

/// Y coordinate of the root level.
pub const LAYOUT_ORIGIN_Y: f32 = 50.0;

/// X coordinate of the spawn point where inserted keys appear and erased
/// keys exit: centered above the canvas, just off-screen.
pub const SPAWN_X: f32 = 600.0;

/// Y coordinate of the spawn point.
pub const SPAWN_Y: f32 = -40.0;
