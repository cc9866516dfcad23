//! Segment tree supporting range assignment and range-minimum queries with lazy propagation.

use anyhow::Result;

use crate::Error;

/// Segment tree supporting range assignment and range-minimum queries over
/// a sequence $`(a_0, \dots, a_{n-1})`$, with lazy propagation.
///
/// Nodes live in a flat array addressed from the root `1`, where the children of node `p`
/// are `2p` and `2p + 1`. A node is either clean or has a pending assignment that its
/// descendants have not seen yet; pending assignments are pushed one level down whenever
/// a query or an update passes through the node.
///
/// A pending assignment is an explicit [`Option`], so every value of `T` (including negative
/// numbers) can be stored and assigned.
///
/// # Memory usage
///
/// $`9n`$ values of type `T`: the backing array, and $`4n`$ minima and pending assignments.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use cpds::SegmentTree;
///
/// let mut st = SegmentTree::from_slice(&[18, 17, 13, 19, 15, 11, 20, 99]);
/// assert_eq!(st.range_min(1, 3)?, Some(13));
/// assert_eq!(st.range_min(4, 7)?, Some(11));
///
/// st.range_assign(5, 5, 77)?;
/// assert_eq!(st.range_min(4, 7)?, Some(15));
///
/// st.range_assign(0, 3, 30)?;
/// assert_eq!(st.range_min(1, 3)?, Some(30));
/// assert_eq!(st.to_vec(), vec![30, 30, 30, 30, 15, 77, 20, 99]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTree<T> {
    vals: Vec<T>,
    mins: Vec<T>,
    lazy: Vec<Option<T>>,
}

impl<T> SegmentTree<T>
where
    T: Copy + Ord,
{
    /// Creates a new tree from a slice of values.
    ///
    /// # Arguments
    ///
    ///  - `values`: Initial values.
    ///
    /// # Complexity
    ///
    /// Linear
    pub fn from_slice(values: &[T]) -> Self {
        let mut st = Self {
            vals: Vec::new(),
            mins: Vec::new(),
            lazy: Vec::new(),
        };
        st.build(values);
        st
    }

    /// Rebuilds the tree from a slice of values, discarding any prior state.
    /// The length becomes `values.len()`.
    ///
    /// # Arguments
    ///
    ///  - `values`: New values.
    ///
    /// # Complexity
    ///
    /// Linear
    pub fn build(&mut self, values: &[T]) {
        let n = values.len();
        self.vals = values.to_vec();
        self.mins = values.first().map_or_else(Vec::new, |&x| vec![x; 4 * n]);
        self.lazy = vec![None; 4 * n];
        if n != 0 {
            self.build_node(1, 0, n - 1);
        }
        log::debug!("built SegmentTree over {n} values");
    }

    /// Rebuilds the tree from a slice of the same length, reusing the storage.
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
    /// use cpds::SegmentTree;
    ///
    /// let mut st = SegmentTree::from_slice(&[3, 1, 2]);
    /// st.range_assign(0, 2, 0)?;
    /// st.refill(&[5, 6, 4])?;
    /// assert_eq!(st.range_min(0, 1)?, Some(5));
    /// assert!(st.refill(&[1]).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn refill(&mut self, values: &[T]) -> Result<()> {
        let n = self.len();
        if values.len() != n {
            return Err(Error::ShapeMismatch {
                expected: n,
                got: values.len(),
            }
            .into());
        }
        self.vals.copy_from_slice(values);
        self.lazy.fill(None);
        if n != 0 {
            self.build_node(1, 0, n - 1);
        }
        log::debug!("refilled SegmentTree over {n} values");
        Ok(())
    }

    fn build_node(&mut self, p: usize, l: usize, r: usize) {
        if l == r {
            self.mins[p] = self.vals[l];
            return;
        }
        let m = (l + r) / 2;
        self.build_node(2 * p, l, m);
        self.build_node(2 * p + 1, m + 1, r);
        self.mins[p] = self.mins[2 * p].min(self.mins[2 * p + 1]);
    }

    /// Applies a pending assignment at node `p` covering `[l, r]` and pushes it to the children,
    /// or commits it to the backing array at a leaf.
    #[inline(always)]
    fn propagate(&mut self, p: usize, l: usize, r: usize) {
        if let Some(x) = self.lazy[p].take() {
            self.mins[p] = x;
            if l != r {
                self.lazy[2 * p] = Some(x);
                self.lazy[2 * p + 1] = Some(x);
            } else {
                self.vals[l] = x;
            }
        }
    }

    /// Returns the minimum of node `p` as seen by its parent.
    #[inline(always)]
    fn effective_min(&self, p: usize) -> T {
        self.lazy[p].unwrap_or(self.mins[p])
    }

    fn check_range(&self, hi: usize) -> Result<()> {
        if self.len() <= hi {
            return Err(Error::out_of_range(hi, 0..self.len()).into());
        }
        Ok(())
    }

    /// Sets every $`a_x`$ with $`lo \leq x \leq hi`$ to `value`.
    /// Nothing happens if $`hi < lo`$.
    ///
    /// # Arguments
    ///
    ///  - `lo`: First position.
    ///  - `hi`: Last position (inclusive).
    ///  - `value`: Value assigned.
    ///
    /// # Errors
    ///
    /// An error is returned if the range is not empty and $`n \leq hi`$.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$
    pub fn range_assign(&mut self, lo: usize, hi: usize, value: T) -> Result<()> {
        if lo > hi {
            return Ok(());
        }
        self.check_range(hi)?;
        let n = self.len();
        self.assign_node(1, 0, n - 1, lo, hi, value);
        Ok(())
    }

    fn assign_node(&mut self, p: usize, l: usize, r: usize, i: usize, j: usize, value: T) {
        self.propagate(p, l, r);
        if i > j {
            return;
        }
        if i <= l && r <= j {
            self.lazy[p] = Some(value);
            self.propagate(p, l, r);
            return;
        }
        let m = (l + r) / 2;
        self.assign_node(2 * p, l, m, i, j.min(m), value);
        self.assign_node(2 * p + 1, m + 1, r, i.max(m + 1), j, value);
        self.mins[p] = self.effective_min(2 * p).min(self.effective_min(2 * p + 1));
    }

    /// Returns the minimum of $`a_x`$ with $`lo \leq x \leq hi`$,
    /// or [`None`] if $`hi < lo`$.
    ///
    /// This takes `&mut self` because pending assignments are pushed down on the way.
    ///
    /// # Arguments
    ///
    ///  - `lo`: First position.
    ///  - `hi`: Last position (inclusive).
    ///
    /// # Errors
    ///
    /// An error is returned if the range is not empty and $`n \leq hi`$.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$
    pub fn range_min(&mut self, lo: usize, hi: usize) -> Result<Option<T>> {
        if lo > hi {
            return Ok(None);
        }
        self.check_range(hi)?;
        let n = self.len();
        Ok(self.min_node(1, 0, n - 1, lo, hi))
    }

    fn min_node(&mut self, p: usize, l: usize, r: usize, i: usize, j: usize) -> Option<T> {
        self.propagate(p, l, r);
        if i > j {
            return None;
        }
        if i <= l && r <= j {
            return Some(self.mins[p]);
        }
        let m = (l + r) / 2;
        let left = self.min_node(2 * p, l, m, i, j.min(m));
        let right = self.min_node(2 * p + 1, m + 1, r, i.max(m + 1), j);
        match (left, right) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Returns $`a_i`$.
    ///
    /// # Errors
    ///
    /// An error is returned if $`n \leq i`$.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$
    pub fn get(&mut self, i: usize) -> Result<T> {
        self.check_range(i)?;
        let n = self.len();
        // A non-empty range always has a minimum.
        Ok(self.min_node(1, 0, n - 1, i, i).unwrap_or(self.vals[i]))
    }

    /// Pushes every pending assignment down to the leaves and returns a copy of the values.
    ///
    /// # Complexity
    ///
    /// Linear
    pub fn to_vec(&mut self) -> Vec<T> {
        let n = self.len();
        if n != 0 {
            self.flush_node(1, 0, n - 1);
        }
        self.vals.clone()
    }

    fn flush_node(&mut self, p: usize, l: usize, r: usize) {
        self.propagate(p, l, r);
        if l == r {
            return;
        }
        let m = (l + r) / 2;
        self.flush_node(2 * p, l, m);
        self.flush_node(2 * p + 1, m + 1, r);
    }

    /// Gets the number of values.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    /// Checks if the tree is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
