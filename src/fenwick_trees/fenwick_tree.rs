//! Fenwick tree supporting point updates and prefix/range sums.

use anyhow::Result;
use num_traits::One;

use crate::broadword;
use crate::fenwick_trees::{check_pos, check_prefix, prelude::*, Element};
use crate::Error;

/// Fenwick tree (binary indexed tree) supporting point updates and prefix/range sums
/// over a logical sequence $`(a_1, \dots, a_m)`$.
///
/// # Memory usage
///
/// $`m + 1`$ values of type `T`, where the first one is a sentinel fixed at zero.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use cpds::fenwick_trees::{FenwickTree, prelude::*};
///
/// let mut fw = FenwickTree::from_slice(&[0i64, 1, 0, 1, 2, 3, 2, 1, 1, 0]);
///
/// assert_eq!(fw.len(), 10);
/// assert_eq!(fw.range_sum(1, 6)?, 7);
/// assert_eq!(fw.find_by_rank(7), Some(6));
///
/// fw.add(5, 1)?;
/// assert_eq!(fw.range_sum(1, 10)?, 12);
/// # Ok(())
/// # }
/// ```
///
/// # References
///
///  - P. M. Fenwick, "A new data structure for cumulative frequency tables,"
///    Software: Practice and Experience, 1994.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenwickTree<T> {
    tree: Vec<T>,
}

impl<T: Element> FenwickTree<T> {
    /// Creates a new tree over $`m`$ zeros.
    ///
    /// # Arguments
    ///
    ///  - `len`: Number of logical values $`m`$.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use cpds::fenwick_trees::{FenwickTree, prelude::*};
    ///
    /// let fw = FenwickTree::<i32>::new(4);
    /// assert_eq!(fw.len(), 4);
    /// assert_eq!(fw.prefix_sum(4)?, 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(len: usize) -> Self {
        Self {
            tree: vec![T::zero(); len + 1],
        }
    }

    /// Creates a new tree from a 0-indexed slice, i.e., `values[i]` becomes $`a_{i+1}`$.
    ///
    /// # Arguments
    ///
    ///  - `values`: Initial values.
    ///
    /// # Complexity
    ///
    /// Linear
    pub fn from_slice(values: &[T]) -> Self {
        let mut fw = Self { tree: Vec::new() };
        fw.build(values);
        fw
    }

    /// Creates a new tree counting how many times each key in $`[1, max\_key]`$ occurs.
    ///
    /// # Arguments
    ///
    ///  - `max_key`: Largest key, which becomes the number of logical values.
    ///  - `keys`: Keys to be counted.
    ///
    /// # Errors
    ///
    /// An error is returned if a key is not in $`[1, max\_key]`$.
    ///
    /// # Complexity
    ///
    /// $`O(m + k)`$ for $`k`$ keys.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use cpds::fenwick_trees::{FenwickTree, prelude::*};
    ///
    /// let fw = FenwickTree::<u32>::from_keys(5, [2, 4, 2, 5])?;
    /// assert_eq!(fw.point_query(2)?, 2);
    /// assert_eq!(fw.range_sum(3, 5)?, 2);
    /// assert_eq!(fw.find_by_rank(3), Some(4));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_keys<I>(max_key: usize, keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
        T: One,
    {
        let mut freqs = vec![T::zero(); max_key];
        for key in keys {
            check_pos(key, max_key)?;
            freqs[key - 1] = freqs[key - 1] + T::one();
        }
        log::debug!("counted keys into FenwickTree over [1, {max_key}]");
        Ok(Self::from_slice(&freqs))
    }

    /// Rebuilds the tree from a 0-indexed slice, discarding any prior state.
    /// The number of logical values becomes `values.len()`.
    ///
    /// # Arguments
    ///
    ///  - `values`: New values.
    ///
    /// # Complexity
    ///
    /// Linear
    pub fn build(&mut self, values: &[T]) {
        self.tree.clear();
        self.tree.reserve(values.len() + 1);
        self.tree.push(T::zero());
        self.tree.extend_from_slice(values);
        self.accumulate();
        log::debug!("built FenwickTree over {} values", values.len());
    }

    /// Rebuilds the tree from a 0-indexed slice of the same length, reusing the storage.
    ///
    /// # Arguments
    ///
    ///  - `values`: New values.
    ///
    /// # Errors
    ///
    /// An error is returned if `values.len() != self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use cpds::fenwick_trees::{FenwickTree, prelude::*};
    ///
    /// let mut fw = FenwickTree::from_slice(&[1, 2, 3]);
    /// fw.refill(&[4, 5, 6])?;
    /// assert_eq!(fw.prefix_sum(2)?, 9);
    /// assert!(fw.refill(&[1, 2]).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn refill(&mut self, values: &[T]) -> Result<()> {
        if values.len() != self.len() {
            return Err(Error::ShapeMismatch {
                expected: self.len(),
                got: values.len(),
            }
            .into());
        }
        self.tree[1..].copy_from_slice(values);
        self.accumulate();
        log::debug!("refilled FenwickTree over {} values", values.len());
        Ok(())
    }

    /// Turns raw values in `tree[1..]` into partial sums.
    fn accumulate(&mut self) {
        let len = self.len();
        for i in 1..=len {
            let parent = i + broadword::lowbit(i);
            if parent <= len {
                self.tree[parent] = self.tree[parent] + self.tree[i];
            }
        }
    }

    /// Adds `delta` to $`a_i`$.
    ///
    /// # Arguments
    ///
    ///  - `i`: Position in $`[1, m]`$.
    ///  - `delta`: Value added.
    ///
    /// # Errors
    ///
    /// An error is returned if `i` is not in $`[1, m]`$.
    ///
    /// # Complexity
    ///
    /// $`O(\lg m)`$
    pub fn add(&mut self, i: usize, delta: T) -> Result<()> {
        check_pos(i, self.len())?;
        self.add_unchecked(i, delta);
        Ok(())
    }

    /// Adds `delta` to $`a_i`$, doing nothing if $`m < i`$.
    pub(crate) fn add_unchecked(&mut self, mut i: usize, delta: T) {
        debug_assert!(i != 0);
        while i < self.tree.len() {
            self.tree[i] = self.tree[i] + delta;
            i += broadword::lowbit(i);
        }
    }

    /// Sums $`a_1, \dots, a_j`$ for $`j \leq m`$.
    #[inline(always)]
    fn prefix_sum_unchecked(&self, mut j: usize) -> T {
        let mut sum = T::zero();
        while j > 0 {
            sum = sum + self.tree[j];
            j -= broadword::lowbit(j);
        }
        sum
    }

    /// Finds the smallest position $`i`$ such that $`\sum_{x=1}^{i} a_x \geq k`$,
    /// or returns [`None`] if no such position exists.
    ///
    /// All values must be non-negative so that prefix sums are monotone.
    /// Otherwise, the result is unspecified; use [`Self::find_by_rank_checked()`]
    /// to validate the values first.
    ///
    /// # Arguments
    ///
    ///  - `k`: Target cumulative value.
    ///
    /// # Complexity
    ///
    /// $`O(\lg m)`$
    ///
    /// # Examples
    ///
    /// ```
    /// use cpds::fenwick_trees::FenwickTree;
    ///
    /// let fw = FenwickTree::from_slice(&[0, 1, 0, 1, 2, 3, 2, 1, 1, 0]);
    /// assert_eq!(fw.find_by_rank(1), Some(2));
    /// assert_eq!(fw.find_by_rank(7), Some(6));
    /// assert_eq!(fw.find_by_rank(8), Some(7));
    /// assert_eq!(fw.find_by_rank(11), Some(9));
    /// assert_eq!(fw.find_by_rank(12), None);
    /// ```
    pub fn find_by_rank(&self, k: T) -> Option<usize>
    where
        T: PartialOrd,
    {
        let len = self.len();
        let mut bit: usize = 1 << broadword::msb(len)?;
        let mut pos = 0usize;
        let mut sum = T::zero();
        // Invariant: prefix_sum(pos) == sum < k.
        while bit > 0 {
            let next = pos + bit;
            if next <= len {
                let next_sum = sum + self.tree[next];
                if next_sum < k {
                    sum = next_sum;
                    pos = next;
                }
            }
            bit >>= 1;
        }
        (pos < len).then_some(pos + 1)
    }

    /// Same as [`Self::find_by_rank()`], but validates that all values are non-negative.
    ///
    /// # Errors
    ///
    /// An error is returned if a negative value is stored.
    ///
    /// # Complexity
    ///
    /// Linear
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use cpds::fenwick_trees::FenwickTree;
    ///
    /// let mut fw = FenwickTree::from_slice(&[3, 1, 4]);
    /// assert_eq!(fw.find_by_rank_checked(4)?, Some(2));
    ///
    /// fw.add(2, -2)?;
    /// assert!(fw.find_by_rank_checked(4).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn find_by_rank_checked(&self, k: T) -> Result<Option<usize>>
    where
        T: PartialOrd,
    {
        if let Some(i) = self.to_vec().iter().position(|&x| x < T::zero()) {
            return Err(Error::precondition(format!(
                "values must be non-negative for rank selection, but the value at {} is negative.",
                i + 1
            ))
            .into());
        }
        Ok(self.find_by_rank(k))
    }

    /// Returns the logical values $`(a_1, \dots, a_m)`$ as a 0-indexed vector.
    ///
    /// # Complexity
    ///
    /// Linear
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use cpds::fenwick_trees::FenwickTree;
    ///
    /// let mut fw = FenwickTree::from_slice(&[5, 0, 2]);
    /// fw.add(2, 7)?;
    /// assert_eq!(fw.to_vec(), vec![5, 7, 2]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_vec(&self) -> Vec<T> {
        let len = self.len();
        let mut vals = self.tree.clone();
        // Undoes accumulate(): vals[i] is still a partial sum when it is subtracted.
        for i in (1..=len).rev() {
            let parent = i + broadword::lowbit(i);
            if parent <= len {
                vals[parent] = vals[parent] - vals[i];
            }
        }
        vals.remove(0);
        vals
    }

    /// Gets the sum of all values.
    pub fn sum(&self) -> T {
        self.prefix_sum_unchecked(self.len())
    }

    /// Gets the number of logical values $`m`$.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    /// Checks if the tree has no values.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Element> NumVals for FenwickTree<T> {
    /// Returns the number of logical values (just wrapping [`Self::len()`]).
    fn num_vals(&self) -> usize {
        self.len()
    }
}

impl<T: Element> PrefixSum<T> for FenwickTree<T> {
    /// Returns $`\sum_{x=1}^{j} a_x`$.
    ///
    /// # Errors
    ///
    /// An error is returned if $`m < j`$.
    ///
    /// # Complexity
    ///
    /// $`O(\lg m)`$
    fn prefix_sum(&self, j: usize) -> Result<T> {
        check_prefix(j, self.len())?;
        Ok(self.prefix_sum_unchecked(j))
    }
}

impl<T: Element> PointQuery<T> for FenwickTree<T> {
    /// Returns $`a_i`$ as the range sum over $`[i, i]`$.
    ///
    /// # Complexity
    ///
    /// $`O(\lg m)`$
    fn point_query(&self, i: usize) -> Result<T> {
        self.range_sum(i, i)
    }
}
