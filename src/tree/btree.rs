//! B-tree - search, split-on-overflow insertion, rebuild-based deletion.

use crate::common::config::MIN_SUPPORTED_DEGREE;
use crate::common::{Error, Key, NodeId, Result};
use crate::tree::{Node, NodeArena};

/// Structural events reported by [`BTree::insert_with`] during its single
/// downward pass, in root-to-leaf order.
///
/// The animated front end turns these into visual steps; the plain
/// [`BTree::insert`] ignores them. Keeping one code path means the animated
/// and immediate variants can never disagree about where a split happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertEvent {
    /// A node on the insertion path is at key capacity and about to split.
    NodeOverflow {
        /// The full node.
        node: NodeId,
    },

    /// A full node was split in two.
    NodeSplit {
        /// The node that kept the lower keys.
        node: NodeId,
        /// The median key promoted into the parent.
        promoted: Key,
        /// Keys left in `node` after the split.
        left_keys: Vec<Key>,
        /// Keys moved into `new_node`.
        right_keys: Vec<Key>,
        /// The freshly allocated right sibling.
        new_node: NodeId,
    },
}

/// An order-preserving multiway search tree.
///
/// # Structure
/// ```text
/// ┌─────────────────────────────────────────────────────┐
/// │                       BTree                         │
/// │  ┌──────────────┐  ┌─────────────────────────────┐  │
/// │  │ root: NodeId │─▶│     arena: NodeArena        │  │
/// │  └──────────────┘  │  [Node0] [Node1] [Node2] …  │  │
/// │  ┌──────────────┐  └─────────────────────────────┘  │
/// │  │ insertion_log│   every key ever inserted,        │
/// │  │   Vec<Key>   │   in insertion order              │
/// │  └──────────────┘                                   │
/// └─────────────────────────────────────────────────────┘
/// ```
///
/// Insertion splits full nodes on the way down, so the tree is rebalanced in
/// a single pass with no backtracking. Deletion is deliberately not the
/// textbook borrow/merge repair: it removes one occurrence from the
/// insertion log and rebuilds the tree by re-inserting the remaining logged
/// keys in their original order. The result is a tree whose invariants hold
/// because the proven insert path produced it, at the cost of O(n log n)
/// work per erase and a different shape than in-place deletion would leave.
///
/// Duplicate keys are not rejected at this layer; callers wanting set
/// semantics check [`contains`](Self::contains) first.
#[derive(Debug)]
pub struct BTree {
    /// Owns every node; freed slots are reused.
    arena: NodeArena,

    /// Handle of the root node, `None` while the tree is empty.
    root: Option<NodeId>,

    /// The degree parameter `t`: nodes hold between `t - 1` and `2t - 1`
    /// keys (root exempt from the lower bound).
    min_degree: usize,

    /// Every key ever successfully inserted, in insertion order. Backs the
    /// rebuild-based erase.
    insertion_log: Vec<Key>,
}

impl BTree {
    /// Create an empty tree with the given minimum degree.
    ///
    /// # Errors
    /// Returns [`Error::InvalidMinDegree`] if `min_degree < 2`.
    pub fn new(min_degree: usize) -> Result<Self> {
        if min_degree < MIN_SUPPORTED_DEGREE {
            return Err(Error::InvalidMinDegree(min_degree));
        }
        Ok(Self {
            arena: NodeArena::new(),
            root: None,
            min_degree,
            insertion_log: Vec::new(),
        })
    }

    // ========================================================================
    // Public API: Queries
    // ========================================================================

    /// The degree parameter `t`, fixed at construction.
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Handle of the root node, if the tree is non-empty.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Borrow a node by handle.
    ///
    /// # Panics
    /// Panics if `id` is stale (names a freed node).
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// Whether the tree holds any keys.
    #[inline]
    pub fn has_keys(&self) -> bool {
        self.root.is_some()
    }

    /// Number of keys currently stored.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.insertion_log.len()
    }

    /// Number of live nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// The insertion log: every currently-held key in insertion order.
    #[inline]
    pub fn insertion_log(&self) -> &[Key] {
        &self.insertion_log
    }

    /// The most recently inserted key still in the tree.
    #[inline]
    pub fn last_inserted_key(&self) -> Option<Key> {
        self.insertion_log.last().copied()
    }

    /// Find the node holding `k`.
    pub fn search(&self, k: Key) -> Option<NodeId> {
        self.locate(k).map(|(id, _)| id)
    }

    /// Find the node holding `k` together with the key's index inside it.
    ///
    /// Walks down from the root; at each node the first index with
    /// `keys[i] >= k` either matches or names the child to descend into.
    pub fn locate(&self, k: Key) -> Option<(NodeId, usize)> {
        let mut current = self.root?;
        loop {
            let node = self.arena.get(current);
            let idx = node.keys().partition_point(|&key| key < k);
            if idx < node.key_count() && node.keys()[idx] == k {
                return Some((current, idx));
            }
            if node.is_leaf() {
                return None;
            }
            current = node.children()[idx];
        }
    }

    /// Whether `k` is present.
    pub fn contains(&self, k: Key) -> bool {
        self.locate(k).is_some()
    }

    // ========================================================================
    // Public API: Mutation
    // ========================================================================

    /// Insert `k`, splitting full nodes on the way down.
    ///
    /// Does not check for an existing equal key; see the type-level notes on
    /// duplicates.
    pub fn insert(&mut self, k: Key) {
        self.insert_with(k, &mut |_| {});
    }

    /// Insert `k`, reporting every overflow and split to `observer` in
    /// root-to-leaf order.
    ///
    /// The mutation is applied eagerly; the observer only watches. This is
    /// the hook the animation layer uses to replay splits as discrete steps.
    pub fn insert_with(&mut self, k: Key, observer: &mut dyn FnMut(InsertEvent)) {
        let root = match self.root {
            None => {
                let mut leaf = Node::new(true);
                leaf.keys_mut().push(k);
                self.root = Some(self.arena.alloc(leaf));
                self.insertion_log.push(k);
                tracing::trace!("inserted {k} as fresh root leaf");
                return;
            }
            Some(id) => id,
        };

        if self.arena.get(root).is_full(self.min_degree) {
            // Root overflow is the only point where the tree grows taller:
            // a new root adopts the old one and splits it before descending.
            observer(InsertEvent::NodeOverflow { node: root });
            let new_root = self.arena.alloc(Node::new(false));
            self.arena.get_mut(new_root).children_mut().push(root);
            self.split_child_with(new_root, 0, observer);
            self.root = Some(new_root);

            let idx = usize::from(self.arena.get(new_root).keys()[0] < k);
            let child = self.arena.get(new_root).children()[idx];
            self.insert_non_full(child, k, observer);
        } else {
            self.insert_non_full(root, k, observer);
        }

        self.insertion_log.push(k);
        tracing::trace!("inserted {k}");
    }

    /// Remove one occurrence of `k` by rebuilding the tree from the
    /// insertion log.
    ///
    /// Removes the first logged occurrence, clears the node tree, and
    /// re-inserts every remaining key in its original order. Returns `false`
    /// (leaving tree and log untouched) when `k` was never inserted.
    pub fn erase(&mut self, k: Key) -> bool {
        let Some(pos) = self.insertion_log.iter().position(|&logged| logged == k) else {
            return false;
        };

        let mut remaining = std::mem::take(&mut self.insertion_log);
        remaining.remove(pos);

        self.clear();
        for key in remaining {
            self.insert(key);
        }
        tracing::debug!("erased {k}, rebuilt tree with {} keys", self.key_count());
        true
    }

    /// Promote the root's sole child when the root has run out of keys.
    ///
    /// Returns whether a promotion happened. A rebuild never produces this
    /// shape, but the guard keeps the tree well-formed for any deletion
    /// strategy that might leave an empty root behind.
    pub fn collapse_root(&mut self) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        let node = self.arena.get(root);
        if node.key_count() != 0 || node.children().len() != 1 {
            return false;
        }
        let child = node.children()[0];
        self.arena.free(root);
        self.root = Some(child);
        tracing::debug!("collapsed empty root {root} into {child}");
        true
    }

    /// Discard the node tree, keeping the insertion log.
    ///
    /// Freed slots stay in the arena for reuse: the rebuild an erase
    /// triggers re-inserts into the same storage it just vacated.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            self.arena.free_subtree(root);
        }
    }

    /// Discard the node tree and the insertion log: a full reset.
    pub fn clear_all(&mut self) {
        self.arena.clear();
        self.root = None;
        self.insertion_log.clear();
        tracing::debug!("cleared tree and insertion log");
    }

    // ========================================================================
    // Public API: Traversal
    // ========================================================================

    /// In-order walk, calling `visit(node, depth, key_index)` for every key.
    ///
    /// Children are visited left-to-right interleaved with the keys of the
    /// same node: child `i` before key `i`, and the last child after the
    /// final key. Visiting the keys in callback order therefore yields them
    /// ascending. The renderer uses this walk to enumerate keys with their
    /// structural position.
    pub fn traverse(&self, mut visit: impl FnMut(NodeId, usize, usize)) {
        if let Some(root) = self.root {
            self.traverse_node(root, 0, &mut visit);
        }
    }

    fn traverse_node(
        &self,
        id: NodeId,
        depth: usize,
        visit: &mut impl FnMut(NodeId, usize, usize),
    ) {
        let node = self.arena.get(id);
        for i in 0..node.key_count() {
            if !node.is_leaf() {
                self.traverse_node(node.children()[i], depth + 1, visit);
            }
            visit(id, depth, i);
        }
        if !node.is_leaf() {
            if let Some(&last) = node.children().last() {
                self.traverse_node(last, depth + 1, visit);
            }
        }
    }

    /// All keys in ascending order (equal keys adjacent).
    pub fn keys_in_order(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.insertion_log.len());
        self.traverse(|id, _, key_index| keys.push(self.arena.get(id).keys()[key_index]));
        keys
    }

    // ========================================================================
    // Internal: Insertion helpers
    // ========================================================================

    /// Insert into the subtree at `id`, which must not be full.
    ///
    /// At a leaf the key slots straight into its sorted position. At an
    /// internal node the target child is split first if it is full, so the
    /// descent never needs to back up.
    fn insert_non_full(&mut self, id: NodeId, k: Key, observer: &mut dyn FnMut(InsertEvent)) {
        if self.arena.get(id).is_leaf() {
            let node = self.arena.get_mut(id);
            let pos = node.keys().partition_point(|&key| key <= k);
            node.keys_mut().insert(pos, k);
            return;
        }

        let mut idx = self.arena.get(id).keys().partition_point(|&key| key <= k);
        let child = self.arena.get(id).children()[idx];
        if self.arena.get(child).is_full(self.min_degree) {
            observer(InsertEvent::NodeOverflow { node: child });
            self.split_child_with(id, idx, observer);
            // The promoted median landed at `idx`; step over it when the new
            // key belongs in the right half.
            if self.arena.get(id).keys()[idx] < k {
                idx += 1;
            }
        }
        let child = self.arena.get(id).children()[idx];
        self.insert_non_full(child, k, observer);
    }

    /// Split the full child at `child_index` of `parent`.
    ///
    /// Classic median promotion: the child keeps the lower `t - 1` keys, a
    /// new right sibling takes the upper `t - 1` (plus the upper `t`
    /// children when internal), and the median key at index `t - 1` moves up
    /// into the parent.
    ///
    /// # Panics
    /// Panics if the child is not full.
    fn split_child_with(
        &mut self,
        parent: NodeId,
        child_index: usize,
        observer: &mut dyn FnMut(InsertEvent),
    ) {
        let t = self.min_degree;
        let child = self.arena.get(parent).children()[child_index];

        let (median, left_keys, right, right_keys) = {
            let y = self.arena.get_mut(child);
            assert!(y.is_full(t), "split of a non-full node {child}");

            let median = y.keys()[t - 1];
            let upper_keys = y.keys_mut().split_off(t);
            y.keys_mut().truncate(t - 1);
            let upper_children = if y.is_leaf() {
                Vec::new()
            } else {
                y.children_mut().split_off(t)
            };

            let left_keys = y.keys().to_vec();
            let right_keys = upper_keys.clone();
            let mut z = Node::new(y.is_leaf());
            *z.keys_mut() = upper_keys;
            *z.children_mut() = upper_children;
            (median, left_keys, z, right_keys)
        };

        let right_id = self.arena.alloc(right);
        let parent_node = self.arena.get_mut(parent);
        parent_node.children_mut().insert(child_index + 1, right_id);
        parent_node.keys_mut().insert(child_index, median);

        observer(InsertEvent::NodeSplit {
            node: child,
            promoted: median,
            left_keys,
            right_keys,
            new_node: right_id,
        });
    }
}
