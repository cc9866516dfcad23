//! Top module for Fenwick trees.
//!
//! # Introduction
//!
//! A Fenwick tree (or binary indexed tree) represents a logical sequence
//! $`A = (a_1, a_2, \dots, a_m)`$ with an array of $`m+1`$ partial sums,
//! where slot $`i`$ holds $`\sum_{i - \textrm{lowbit}(i) < x \leq i} a_x`$.
//! Positions are 1-indexed throughout this module.
//!
//! Our Fenwick trees support the following queries:
//!
//! - $`\textrm{PrefixSum}(j)`$ returns $`\sum_{x=1}^{j} a_x`$ (implemented by [`PrefixSum`]).
//! - $`\textrm{RangeSum}(i, j)`$ returns $`\sum_{x=i}^{j} a_x`$ (implemented by [`PrefixSum`]).
//! - $`\textrm{PointQuery}(i)`$ returns $`a_i`$ (implemented by [`PointQuery`]).
//! - $`\textrm{RangeUpdate}(l, h, d)`$ adds $`d`$ to every $`a_x`$ with $`l \leq x \leq h`$
//!   (implemented by [`RangeUpdate`]).
//!
//! # Data structures
//!
//! | Implementation | Point update | Range update | Point query | Range sum |
//! | --- | :-: | :-: | :-: | :-: |
//! | [`FenwickTree`] | $`O(\lg m)`$ | -- | $`O(\lg m)`$ | $`O(\lg m)`$ |
//! | [`RangeUpdatePointQuery`] | -- | $`O(\lg m)`$ | $`O(\lg m)`$ | -- |
//! | [`RangeUpdateRangeSum`] | -- | $`O(\lg m)`$ | $`O(\lg m)`$ | $`O(\lg m)`$ |
//!
//! [`FenwickTree`] is the point-update/range-sum core. It also supports $`O(n)`$ bulk
//! construction and rank selection by binary lifting ([`FenwickTree::find_by_rank()`]).
//!
//! [`RangeUpdatePointQuery`] stores the difference array of $`A`$ in a [`FenwickTree`],
//! so that a range update is two point updates and a point query is a prefix sum.
//!
//! [`RangeUpdateRangeSum`] treats a range update as a linear function of the position and
//! keeps its slope in a [`RangeUpdatePointQuery`] and its intercept correction in a
//! [`FenwickTree`].
//!
//! # Examples
//!
//! [`prelude`] imports the query traits.
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cpds::fenwick_trees::{RangeUpdateRangeSum, prelude::*};
//!
//! let mut rurq = RangeUpdateRangeSum::<i64>::new(10);
//! rurq.range_update(2, 9, 7)?;
//! rurq.range_update(6, 7, 3)?;
//!
//! assert_eq!(rurq.num_vals(), 10);
//! assert_eq!(rurq.range_sum(1, 10)?, 62);
//! assert_eq!(rurq.range_sum(6, 7)?, 20);
//! assert_eq!(rurq.point_query(6)?, 10);
//! # Ok(())
//! # }
//! ```
pub mod fenwick_tree;
pub mod prelude;
pub mod range_update_point_query;
pub mod range_update_range_sum;

pub use fenwick_tree::FenwickTree;
pub use range_update_point_query::RangeUpdatePointQuery;
pub use range_update_range_sum::RangeUpdateRangeSum;

use std::ops::{Mul, Neg, Sub};

use anyhow::Result;
use num_traits::{FromPrimitive, Zero};

use crate::Error;

/// Values that can be accumulated in a [`FenwickTree`], i.e., an abelian group under `+`.
pub trait Element: Copy + Zero + Sub<Output = Self> {}

impl<T> Element for T where T: Copy + Zero + Sub<Output = T> {}

/// Values that can be range-updated, requiring negation to cancel a delta.
pub trait SignedElement: Element + Neg<Output = Self> {}

impl<T> SignedElement for T where T: Element + Neg<Output = T> {}

/// Values that can be scaled by positions, as needed by [`RangeUpdateRangeSum`].
pub trait LinearElement: SignedElement + Mul<Output = Self> + FromPrimitive {}

impl<T> LinearElement for T where T: SignedElement + Mul<Output = T> + FromPrimitive {}

/// Interface for reporting the number of logical values.
pub trait NumVals {
    /// Returns the number of logical values $`m`$.
    fn num_vals(&self) -> usize;
}

/// Interface for prefix-sum and range-sum queries.
pub trait PrefixSum<T: Element>: NumVals {
    /// Returns $`\sum_{x=1}^{j} a_x`$, which is zero if $`j = 0`$.
    ///
    /// # Errors
    ///
    /// An error is returned if $`m < j`$.
    fn prefix_sum(&self, j: usize) -> Result<T>;

    /// Returns $`\sum_{x=i}^{j} a_x`$, which is zero if $`j < i`$ (an empty range).
    ///
    /// # Errors
    ///
    /// An error is returned if the range is not empty and `i` or `j` is not in $`[1, m]`$.
    fn range_sum(&self, i: usize, j: usize) -> Result<T> {
        if i > j {
            return Ok(T::zero());
        }
        check_pos(i, self.num_vals())?;
        check_pos(j, self.num_vals())?;
        Ok(self.prefix_sum(j)? - self.prefix_sum(i - 1)?)
    }
}

/// Interface for reading a single logical value.
pub trait PointQuery<T> {
    /// Returns $`a_i`$.
    ///
    /// # Errors
    ///
    /// An error is returned if `i` is not in $`[1, m]`$.
    fn point_query(&self, i: usize) -> Result<T>;
}

/// Interface for adding a delta to every value in a range.
pub trait RangeUpdate<T> {
    /// Adds `delta` to every $`a_x`$ with $`lo \leq x \leq hi`$.
    /// Nothing happens if $`hi < lo`$.
    ///
    /// # Errors
    ///
    /// An error is returned if the range is not empty and `lo` or `hi` is not in $`[1, m]`$.
    fn range_update(&mut self, lo: usize, hi: usize, delta: T) -> Result<()>;
}

/// Checks that a 1-indexed position lies in `[1, len]`.
#[inline(always)]
pub(crate) fn check_pos(pos: usize, len: usize) -> Result<()> {
    if pos == 0 || len < pos {
        return Err(Error::out_of_range(pos, 1..len + 1).into());
    }
    Ok(())
}

/// Checks that a prefix bound lies in `[0, len]`.
#[inline(always)]
pub(crate) fn check_prefix(pos: usize, len: usize) -> Result<()> {
    if len < pos {
        return Err(Error::out_of_range(pos, 0..len + 1).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    fn gen_random_updates(len: usize, num: usize, seed: u64) -> Vec<(usize, usize, i64)> {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        (0..num)
            .map(|_| {
                let lo = rng.gen_range(1..=len);
                let hi = rng.gen_range(lo..=len);
                (lo, hi, rng.gen_range(-50..=50))
            })
            .collect()
    }

    #[test]
    fn test_check_pos() {
        assert!(check_pos(1, 1).is_ok());
        assert_eq!(
            check_pos(0, 3).err().map(|x| x.to_string()),
            Some("pos must be in 1..4, but got 0.".to_string())
        );
        assert_eq!(
            check_prefix(4, 3).err().map(|x| x.to_string()),
            Some("pos must be in 0..4, but got 4.".to_string())
        );
    }

    #[test]
    fn test_rupq_rurq_equivalence() {
        let len = 200;
        let mut rupq = RangeUpdatePointQuery::<i64>::new(len);
        let mut rurq = RangeUpdateRangeSum::<i64>::new(len);
        for (lo, hi, delta) in gen_random_updates(len, 500, 7) {
            rupq.range_update(lo, hi, delta).unwrap();
            rurq.range_update(lo, hi, delta).unwrap();
        }
        for i in 1..=len {
            assert_eq!(rurq.range_sum(i, i).unwrap(), rupq.point_query(i).unwrap());
        }
    }

    #[test]
    fn test_point_query_agrees_across_variants() {
        let len = 64;
        let mut naive = vec![0i64; len + 1];
        let mut rupq = RangeUpdatePointQuery::<i64>::new(len);
        for (lo, hi, delta) in gen_random_updates(len, 100, 42) {
            rupq.range_update(lo, hi, delta).unwrap();
            for x in &mut naive[lo..=hi] {
                *x += delta;
            }
        }
        let fw = FenwickTree::from_slice(&naive[1..]);
        for i in 1..=len {
            assert_eq!(fw.point_query(i).unwrap(), naive[i]);
            assert_eq!(rupq.point_query(i).unwrap(), naive[i]);
        }
    }
}
