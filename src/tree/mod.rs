//! The multiway tree layer.
//!
//! # Components
//! - [`BTree`] - the tree proper: search, split-on-overflow insertion,
//!   rebuild-based deletion, in-order traversal
//! - [`Node`] - a single node: keys plus child handles
//! - [`NodeArena`] - slab storage owning every node
//! - [`InsertEvent`] - overflow/split notifications for observers

mod arena;
mod btree;
mod node;

pub use arena::NodeArena;
pub use btree::{BTree, InsertEvent};
pub use node::Node;
