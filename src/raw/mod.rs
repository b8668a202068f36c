mod arena;
mod block;
mod handle;
mod priority;
mod raw_block_deque;
mod raw_treap;
mod tree_node;

pub(crate) use handle::{Handle, Owner};
pub(crate) use priority::PriorityGen;
pub(crate) use raw_block_deque::{Location, RawBlockDeque};
pub(crate) use raw_treap::{RawTreap, Spine};
