//! Fenwick tree supporting range updates and point queries.

use anyhow::Result;

use crate::fenwick_trees::{check_pos, prelude::*, FenwickTree, SignedElement};

/// Fenwick tree supporting range updates and point queries,
/// built on a [`FenwickTree`] over the difference array $`d_i = a_i - a_{i-1}`$.
///
/// A range update on $`[lo, hi]`$ adds `delta` to $`d_{lo}`$ and cancels it at $`d_{hi+1}`$,
/// so the prefix sum $`\sum_{x=1}^{i} d_x`$ accumulates exactly the deltas covering $`i`$.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use cpds::fenwick_trees::{RangeUpdatePointQuery, prelude::*};
///
/// let mut rupq = RangeUpdatePointQuery::<i64>::new(10);
/// rupq.range_update(2, 9, 7)?;
/// rupq.range_update(6, 7, 3)?;
///
/// assert_eq!(rupq.point_query(1)?, 0);
/// assert_eq!(rupq.point_query(6)?, 10);
/// assert_eq!(rupq.point_query(9)?, 7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeUpdatePointQuery<T> {
    diffs: FenwickTree<T>,
}

impl<T: SignedElement> RangeUpdatePointQuery<T> {
    /// Creates a new structure over $`m`$ zeros.
    ///
    /// # Arguments
    ///
    ///  - `len`: Number of logical values $`m`$.
    pub fn new(len: usize) -> Self {
        Self {
            diffs: FenwickTree::new(len),
        }
    }

    /// Creates a new structure from a 0-indexed slice of initial values.
    ///
    /// # Arguments
    ///
    ///  - `values`: Initial values.
    ///
    /// # Complexity
    ///
    /// Linear
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use cpds::fenwick_trees::{RangeUpdatePointQuery, prelude::*};
    ///
    /// let mut rupq = RangeUpdatePointQuery::from_slice(&[4, -1, 3]);
    /// rupq.range_update(1, 2, 2)?;
    /// assert_eq!(rupq.to_vec(), vec![6, 1, 3]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_slice(values: &[T]) -> Self {
        let mut prev = T::zero();
        let diffs: Vec<T> = values
            .iter()
            .map(|&x| {
                let d = x - prev;
                prev = x;
                d
            })
            .collect();
        Self {
            diffs: FenwickTree::from_slice(&diffs),
        }
    }

    /// Returns the logical values $`(a_1, \dots, a_m)`$ as a 0-indexed vector.
    ///
    /// # Complexity
    ///
    /// Linear
    pub fn to_vec(&self) -> Vec<T> {
        let mut acc = T::zero();
        self.diffs
            .to_vec()
            .into_iter()
            .map(|d| {
                acc = acc + d;
                acc
            })
            .collect()
    }

    /// Gets the number of logical values $`m`$.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    /// Checks if the structure has no values.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: SignedElement> NumVals for RangeUpdatePointQuery<T> {
    /// Returns the number of logical values (just wrapping [`Self::len()`]).
    fn num_vals(&self) -> usize {
        self.len()
    }
}

impl<T: SignedElement> RangeUpdate<T> for RangeUpdatePointQuery<T> {
    /// Adds `delta` to every $`a_x`$ with $`lo \leq x \leq hi`$.
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
        self.diffs.add_unchecked(lo, delta);
        // No-op if hi == m.
        self.diffs.add_unchecked(hi + 1, -delta);
        Ok(())
    }
}

impl<T: SignedElement> PointQuery<T> for RangeUpdatePointQuery<T> {
    /// Returns $`a_i`$ as the prefix sum of the difference array.
    ///
    /// # Complexity
    ///
    /// $`O(\lg m)`$
    fn point_query(&self, i: usize) -> Result<T> {
        check_pos(i, self.len())?;
        self.diffs.prefix_sum(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_two_updates_scenario() {
        let mut rupq = RangeUpdatePointQuery::<i64>::new(10);
        rupq.range_update(2, 9, 7).unwrap();
        rupq.range_update(6, 7, 3).unwrap();
        assert_eq!(rupq.to_vec(), vec![0, 7, 7, 7, 7, 10, 10, 7, 7, 0]);
        assert_eq!(rupq.point_query(6).unwrap(), 10);
        assert_eq!(rupq.point_query(1).unwrap(), 0);
        assert_eq!(rupq.point_query(9).unwrap(), 7);
    }

    #[test]
    fn test_update_to_last() {
        let mut rupq = RangeUpdatePointQuery::<i64>::new(4);
        rupq.range_update(3, 4, 5).unwrap();
        rupq.range_update(1, 4, -1).unwrap();
        assert_eq!(rupq.to_vec(), vec![-1, -1, 4, 4]);
    }

    #[test]
    fn test_random_against_naive() {
        let mut rng = ChaChaRng::seed_from_u64(13);
        let len = 128;
        let init: Vec<i64> = (0..len).map(|_| rng.gen_range(-9..=9)).collect();
        let mut naive = init.clone();
        let mut rupq = RangeUpdatePointQuery::from_slice(&init);
        for _ in 0..1000 {
            let lo = rng.gen_range(1..=len);
            let hi = rng.gen_range(lo..=len);
            let delta = rng.gen_range(-20..=20);
            rupq.range_update(lo, hi, delta).unwrap();
            for x in &mut naive[lo - 1..hi] {
                *x += delta;
            }
            let i = rng.gen_range(1..=len);
            assert_eq!(rupq.point_query(i).unwrap(), naive[i - 1]);
        }
        assert_eq!(rupq.to_vec(), naive);
    }

    #[test]
    fn test_empty_update() {
        let mut rupq = RangeUpdatePointQuery::<i64>::new(3);
        rupq.range_update(3, 1, 5).unwrap();
        assert_eq!(rupq.to_vec(), vec![0, 0, 0]);
    }

    #[test]
    fn test_range_update_oob() {
        let mut rupq = RangeUpdatePointQuery::<i64>::new(3);
        let e = rupq.range_update(2, 4, 1);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("pos must be in 1..4, but got 4.".to_string())
        );
        let e = rupq.range_update(0, 2, 1);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("pos must be in 1..4, but got 0.".to_string())
        );
        assert_eq!(rupq.to_vec(), vec![0, 0, 0]);
    }

    #[test]
    fn test_point_query_oob() {
        let rupq = RangeUpdatePointQuery::<i64>::new(3);
        let e = rupq.point_query(0);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("pos must be in 1..4, but got 0.".to_string())
        );
    }
}
