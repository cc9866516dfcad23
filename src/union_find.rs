//! Disjoint-set forest with union by rank and path compression.

use std::cell::Cell;

use anyhow::Result;

use crate::Error;

/// Disjoint-set forest over elements $`\{0, 1, \dots, n-1\}`$,
/// tracking the size of each set and the number of sets.
///
/// [`Self::find()`] compresses paths through interior mutability, so read-only queries
/// take `&self`.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use cpds::UnionFind;
///
/// let mut uf = UnionFind::new(5);
/// uf.union(0, 1)?;
/// uf.union(2, 3)?;
/// uf.union(4, 3)?;
///
/// assert_eq!(uf.num_sets(), 2);
/// assert!(!uf.same_set(0, 3)?);
/// assert!(uf.same_set(4, 2)?);
/// assert_eq!(uf.size_of(4)?, 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parents: Vec<Cell<usize>>,
    ranks: Vec<u32>,
    sizes: Vec<usize>,
    num_sets: usize,
}

impl UnionFind {
    /// Creates $`n`$ singleton sets.
    ///
    /// # Arguments
    ///
    ///  - `n`: Number of elements.
    pub fn new(n: usize) -> Self {
        Self {
            parents: (0..n).map(Cell::new).collect(),
            ranks: vec![0; n],
            sizes: vec![1; n],
            num_sets: n,
        }
    }

    fn check(&self, i: usize) -> Result<()> {
        if self.len() <= i {
            return Err(Error::out_of_range(i, 0..self.len()).into());
        }
        Ok(())
    }

    /// Returns the representative of the set containing `i`.
    ///
    /// # Errors
    ///
    /// An error is returned if $`n \leq i`$.
    ///
    /// # Complexity
    ///
    /// Amortized $`O(\alpha(n))`$
    pub fn find(&self, i: usize) -> Result<usize> {
        self.check(i)?;
        Ok(self.find_root(i))
    }

    fn find_root(&self, i: usize) -> usize {
        let mut root = i;
        while self.parents[root].get() != root {
            root = self.parents[root].get();
        }
        let mut cur = i;
        while cur != root {
            let next = self.parents[cur].get();
            self.parents[cur].set(root);
            cur = next;
        }
        root
    }

    /// Merges the sets containing `i` and `j`, returning `true` if they were disjoint.
    ///
    /// # Errors
    ///
    /// An error is returned if $`n \leq i`$ or $`n \leq j`$.
    ///
    /// # Complexity
    ///
    /// Amortized $`O(\alpha(n))`$
    pub fn union(&mut self, i: usize, j: usize) -> Result<bool> {
        self.check(i)?;
        self.check(j)?;
        let mut x = self.find_root(i);
        let mut y = self.find_root(j);
        if x == y {
            return Ok(false);
        }
        if self.ranks[x] > self.ranks[y] {
            std::mem::swap(&mut x, &mut y);
        }
        self.parents[x].set(y);
        if self.ranks[x] == self.ranks[y] {
            self.ranks[y] += 1;
        }
        self.sizes[y] += self.sizes[x];
        self.num_sets -= 1;
        log::trace!("merged set {x} into {y}; {} sets left", self.num_sets);
        Ok(true)
    }

    /// Checks if `i` and `j` are in the same set.
    ///
    /// # Errors
    ///
    /// An error is returned if $`n \leq i`$ or $`n \leq j`$.
    pub fn same_set(&self, i: usize, j: usize) -> Result<bool> {
        Ok(self.find(i)? == self.find(j)?)
    }

    /// Returns the size of the set containing `i`.
    ///
    /// # Errors
    ///
    /// An error is returned if $`n \leq i`$.
    pub fn size_of(&self, i: usize) -> Result<usize> {
        Ok(self.sizes[self.find(i)?])
    }

    /// Gets the number of disjoint sets.
    #[inline(always)]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Gets the number of elements $`n`$.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Checks if there are no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_five_elements() {
        let mut uf = UnionFind::new(5);
        assert_eq!(uf.num_sets(), 5);
        assert!(uf.union(0, 1).unwrap());
        assert_eq!(uf.num_sets(), 4);
        assert!(uf.union(2, 3).unwrap());
        assert_eq!(uf.num_sets(), 3);
        assert!(uf.union(4, 3).unwrap());
        assert_eq!(uf.num_sets(), 2);
        assert!(!uf.same_set(0, 3).unwrap());
        assert!(uf.same_set(4, 3).unwrap());
        for (i, size) in [2, 2, 3, 3, 3].into_iter().enumerate() {
            assert_eq!(uf.size_of(i).unwrap(), size);
        }
        assert!(uf.union(0, 3).unwrap());
        assert!(!uf.union(1, 4).unwrap());
        assert_eq!(uf.num_sets(), 1);
        let root = uf.find(0).unwrap();
        for i in 0..5 {
            assert_eq!(uf.find(i).unwrap(), root);
            assert_eq!(uf.size_of(i).unwrap(), 5);
        }
    }

    #[test]
    fn test_random_against_labels() {
        let mut rng = ChaChaRng::seed_from_u64(334);
        let n = 200;
        let mut labels: Vec<usize> = (0..n).collect();
        let mut uf = UnionFind::new(n);
        for _ in 0..150 {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            let (li, lj) = (labels[i], labels[j]);
            assert_eq!(uf.union(i, j).unwrap(), li != lj);
            for l in &mut labels {
                if *l == lj {
                    *l = li;
                }
            }
        }
        let mut distinct = labels.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(uf.num_sets(), distinct.len());
        for i in 0..n {
            let size = labels.iter().filter(|&&l| l == labels[i]).count();
            assert_eq!(uf.size_of(i).unwrap(), size);
            let j = rng.gen_range(0..n);
            assert_eq!(uf.same_set(i, j).unwrap(), labels[i] == labels[j]);
        }
    }

    #[test]
    fn test_oob() {
        let mut uf = UnionFind::new(3);
        let e = uf.union(1, 3);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("pos must be in 0..3, but got 3.".to_string())
        );
        assert!(uf.find(5).is_err());
        assert_eq!(uf.num_sets(), 3);
    }
}
