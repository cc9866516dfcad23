//! Fenwick tree supporting range updates and range sums.

use anyhow::Result;

use crate::fenwick_trees::{
    check_pos, check_prefix, prelude::*, FenwickTree, LinearElement, RangeUpdatePointQuery,
};
use crate::Error;

/// Fenwick tree supporting range updates and range sums.
///
/// Adding $`\delta`$ to $`[lo, hi]`$ changes the prefix sum at $`j`$ by
///
/// - $`0`$ if $`j < lo`$,
/// - $`\delta j - \delta (lo - 1)`$ if $`lo \leq j \leq hi`$, and
/// - $`\delta hi - \delta (lo - 1)`$ if $`hi < j`$.
///
/// The slope $`\delta`$ is kept by a [`RangeUpdatePointQuery`] and the correction terms
/// by a [`FenwickTree`], so that $`\textrm{PrefixSum}(j) = \textrm{slope}(j) \cdot j - \textrm{offset}(j)`$.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use cpds::fenwick_trees::{RangeUpdateRangeSum, prelude::*};
///
/// let mut rurq = RangeUpdateRangeSum::<i64>::new(10);
/// rurq.range_update(2, 9, 7)?;
/// rurq.range_update(6, 7, 3)?;
///
/// assert_eq!(rurq.range_sum(1, 10)?, 62);
/// assert_eq!(rurq.range_sum(6, 7)?, 20);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeUpdateRangeSum<T> {
    slope: RangeUpdatePointQuery<T>,
    offset: FenwickTree<T>,
}

impl<T: LinearElement> RangeUpdateRangeSum<T> {
    /// Creates a new structure over $`m`$ zeros.
    ///
    /// # Arguments
    ///
    ///  - `len`: Number of logical values $`m`$.
    pub fn new(len: usize) -> Self {
        Self {
            slope: RangeUpdatePointQuery::new(len),
            offset: FenwickTree::new(len),
        }
    }

    /// Creates a new structure from a 0-indexed slice of initial values.
    ///
    /// # Arguments
    ///
    ///  - `values`: Initial values.
    ///
    /// # Errors
    ///
    /// An error is returned if a position cannot be represented in `T`.
    ///
    /// # Complexity
    ///
    /// $`O(n \lg n)`$
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use cpds::fenwick_trees::{RangeUpdateRangeSum, prelude::*};
    ///
    /// let mut rurq = RangeUpdateRangeSum::from_slice(&[3i64, 1, 4, 1, 5])?;
    /// assert_eq!(rurq.range_sum(2, 4)?, 6);
    ///
    /// rurq.range_update(1, 3, -1)?;
    /// assert_eq!(rurq.range_sum(1, 5)?, 11);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_slice(values: &[T]) -> Result<Self> {
        let mut rurq = Self::new(values.len());
        for (i, &x) in values.iter().enumerate() {
            if !x.is_zero() {
                rurq.range_update(i + 1, i + 1, x)?;
            }
        }
        Ok(rurq)
    }

    /// Gets the number of logical values $`m`$.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.offset.len()
    }

    /// Checks if the structure has no values.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Converts a position into the element type.
fn position_to_elem<T: LinearElement>(pos: usize) -> Result<T> {
    T::from_usize(pos).ok_or_else(|| {
        Error::precondition(format!(
            "position {pos} cannot be represented in {}.",
            std::any::type_name::<T>()
        ))
        .into()
    })
}

impl<T: LinearElement> NumVals for RangeUpdateRangeSum<T> {
    /// Returns the number of logical values (just wrapping [`Self::len()`]).
    fn num_vals(&self) -> usize {
        self.len()
    }
}

impl<T: LinearElement> RangeUpdate<T> for RangeUpdateRangeSum<T> {
    /// Adds `delta` to every $`a_x`$ with $`lo \leq x \leq hi`$.
    ///
    /// # Errors
    ///
    /// An error is returned if
    ///
    ///  - the range is not empty and `lo` or `hi` is not in $`[1, m]`$, or
    ///  - `lo - 1` or `hi` cannot be represented in `T`.
    ///
    /// The structure is left untouched on error.
    ///
    /// # Complexity
    ///
    /// $`O(\lg m)`$
    fn range_update(&mut self, lo: usize, hi: usize, delta: T) -> Result<()> {
        if lo > hi {
            return Ok(());
        }
        check_pos(lo, self.len())?;
        check_pos(hi, self.len())?;
        let before = position_to_elem::<T>(lo - 1)?;
        let last = position_to_elem::<T>(hi)?;
        self.slope.range_update(lo, hi, delta)?;
        self.offset.add_unchecked(lo, delta * before);
        self.offset.add_unchecked(hi + 1, -(delta * last));
        Ok(())
    }
}

impl<T: LinearElement> PrefixSum<T> for RangeUpdateRangeSum<T> {
    /// Returns $`\sum_{x=1}^{j} a_x`$.
    ///
    /// # Errors
    ///
    /// An error is returned if
    ///
    ///  - $`m < j`$, or
    ///  - `j` cannot be represented in `T`.
    ///
    /// # Complexity
    ///
    /// $`O(\lg m)`$
    fn prefix_sum(&self, j: usize) -> Result<T> {
        check_prefix(j, self.len())?;
        if j == 0 {
            return Ok(T::zero());
        }
        let scale = position_to_elem::<T>(j)?;
        Ok(self.slope.point_query(j)? * scale - self.offset.prefix_sum(j)?)
    }
}

impl<T: LinearElement> PointQuery<T> for RangeUpdateRangeSum<T> {
    /// Returns $`a_i`$ as the range sum over $`[i, i]`$.
    ///
    /// # Complexity
    ///
    /// $`O(\lg m)`$
    fn point_query(&self, i: usize) -> Result<T> {
        self.range_sum(i, i)
    }
}
