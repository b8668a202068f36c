//! Order-statistic collections with validity-checked cursors.
//!
//! This crate provides two containers:
//!
//! - [`BlockDeque`] - an indexed double-ended sequence stored as a chain of bounded blocks.
//!   Inserting or removing anywhere costs O(√n), not just at the ends.
//! - [`TreapMap`] - an ordered map on a randomized treap that answers both key lookups and
//!   rank queries in expected O(log n).
//!
//! Both hand out cursors ([`block_deque::Cursor`], [`treap_map::Cursor`]) that can be checked
//! for validity after arbitrary mutation. A stale cursor is reported as
//! [`Error::InvalidIterator`] rather than silently reading the wrong element.
//!
//! # Example
//!
//! ```
//! use rank_collections::{BlockDeque, Error, Rank, TreapMap};
//!
//! let mut deque: BlockDeque<i32> = (0..1000).collect();
//! let middle = deque.insert_at(500, -1).unwrap();
//! assert_eq!(deque.get_at(&middle), Ok(&-1));
//! assert_eq!(deque.at(1001), Err(Error::IndexOutOfBound));
//!
//! // Any structural change invalidates cursors that no longer match the chain.
//! deque.push_front(-2);
//! assert!(!deque.is_valid(&middle));
//!
//! let mut scores = TreapMap::new();
//! scores.insert("Carol", 92);
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//!
//! assert_eq!(scores.rank_of(&"Carol"), Some(2));
//! assert_eq!(scores[Rank(0)], 100);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Checked cursors** - Dereferencing or moving a stale cursor is an error, not a bug
//! - **Tunable blocks** - [`block_deque::Thresholds`] controls when blocks split and merge
//! - **Reproducible treaps** - [`TreapMap::with_seed`] fixes the node priorities
//!
//! # Implementation
//!
//! Blocks, value cells and tree nodes live in index arenas. An element keeps the same slot for
//! its whole life, so splitting and merging only rewire indices.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;

pub mod block_deque;
pub mod error;
pub mod treap_map;

pub use block_deque::BlockDeque;
pub use error::{Error, Result};
pub use order_statistic::Rank;
pub use treap_map::TreapMap;
