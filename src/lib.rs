//! # `cpds`: Competitive-programming data structures in Rust
//!
//! `cpds` contains some classic dynamic range-query structures and the small utilities
//! that usually accompany them.
//!
//! ## Data structures
//!
//! - [`FenwickTree`]
//!   - Binary indexed tree supporting point updates, prefix/range sums, and rank selection.
//! - [`RangeUpdatePointQuery`]
//!   - Fenwick tree over a difference array, supporting range updates and point queries.
//! - [`RangeUpdateRangeSum`]
//!   - Pair of Fenwick trees supporting range updates and range sums.
//! - [`SegmentTree`]
//!   - Lazy segment tree supporting range assignment and range minimum.
//! - [`UnionFind`]
//!   - Disjoint-set forest with union by rank and path compression.
//! - [`OrderStatisticsTree`]
//!   - AVL tree of distinct keys supporting selection and rank by order.
//! - [`Zn`]
//!   - Integers modulo a compile-time constant, usable as Fenwick tree elements.
//! - [`HashTable`]
//!   - Hash map with a seeded splitmix64 hasher.
//!
//! ## Errors
//!
//! Fallible operations return [`anyhow::Result`] wrapping an [`Error`],
//! which can be recovered with [`anyhow::Error::downcast_ref()`].
//!
//! ```
//! use cpds::{Error, FenwickTree};
//! use cpds::fenwick_trees::prelude::*;
//!
//! let fw = FenwickTree::from_slice(&[1i64, 2, 3]);
//! let e = fw.range_sum(1, 4).unwrap_err();
//! assert!(matches!(
//!     e.downcast_ref::<Error>(),
//!     Some(Error::IndexOutOfRange { pos: 4, .. })
//! ));
//! ```
#![deny(missing_docs)]

pub mod broadword;
pub mod error;
pub mod fenwick_trees;
pub mod hash_table;
pub mod order_statistics_tree;
pub mod segment_tree;
pub mod union_find;
pub mod zn;

pub use error::Error;
pub use fenwick_trees::FenwickTree;
pub use fenwick_trees::RangeUpdatePointQuery;
pub use fenwick_trees::RangeUpdateRangeSum;
pub use hash_table::HashTable;
pub use order_statistics_tree::OrderStatisticsTree;
pub use segment_tree::SegmentTree;
pub use union_find::UnionFind;
pub use zn::Zn;
