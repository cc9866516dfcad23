//! The prelude for Fenwick trees.
//!
//! The purpose of this module is to alleviate imports of many common traits for Fenwick trees.
//!
//! ```
//! # #![allow(unused_imports)]
//! use cpds::fenwick_trees::prelude::*;
//! ```
pub use crate::fenwick_trees::{NumVals, PointQuery, PrefixSum, RangeUpdate};
