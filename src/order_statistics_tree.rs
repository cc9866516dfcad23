//! Order-statistics tree over a dynamic set of keys.

use std::cmp::Ordering;

type Link<K> = Option<Box<Node<K>>>;

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    height: u32,
    size: usize,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    const fn new(key: K) -> Self {
        Self {
            key,
            height: 1,
            size: 1,
            left: None,
            right: None,
        }
    }
}

/// Order-statistics tree, i.e., a balanced binary search tree over unique keys
/// whose nodes are augmented with subtree sizes.
///
/// Besides membership queries, it answers
///
/// - $`\textrm{Select}(k)`$, the $`k`$-th smallest key (0-indexed), and
/// - $`\textrm{Rank}(x)`$, the number of keys strictly less than $`x`$,
///
/// in logarithmic time. Balance is maintained with AVL rotations.
///
/// # Examples
///
/// ```
/// use cpds::OrderStatisticsTree;
///
/// let mut ost: OrderStatisticsTree<i32> = [2, 4, 7, 10, 15, 23, 50, 65, 71].into_iter().collect();
///
/// assert_eq!(ost.select(0), Some(&2));
/// assert_eq!(ost.select(4), Some(&15));
/// assert_eq!(ost.select(8), Some(&71));
/// assert_eq!(ost.select(9), None);
///
/// assert_eq!(ost.rank(&2), 0);
/// assert_eq!(ost.rank(&15), 4);
/// assert_eq!(ost.rank(&71), 8);
///
/// assert!(ost.remove(&15));
/// assert_eq!(ost.select(4), Some(&23));
/// ```
///
/// # References
///
///  - G. Adelson-Velsky, and E. Landis, "An algorithm for the organization of information,"
///    Proceedings of the USSR Academy of Sciences, 1962.
#[derive(Debug, Clone)]
pub struct OrderStatisticsTree<K> {
    root: Link<K>,
}

impl<K> Default for OrderStatisticsTree<K> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<K: Ord> OrderStatisticsTree<K> {
    /// Creates a new empty tree.
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Inserts `key`, returning `true` if it was not present.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$
    pub fn insert(&mut self, key: K) -> bool {
        let (root, inserted) = insert(self.root.take(), key);
        self.root = Some(root);
        inserted
    }

    /// Removes `key`, returning `true` if it was present.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$
    pub fn remove(&mut self, key: &K) -> bool {
        let (root, removed) = remove(self.root.take(), key);
        self.root = root;
        removed
    }

    /// Checks if `key` is present.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$
    pub fn contains(&self, key: &K) -> bool {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Returns the `k`-th smallest key (0-indexed), or [`None`] if $`n \leq k`$.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$
    pub fn select(&self, mut k: usize) -> Option<&K> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            let left_size = size(&node.left);
            cur = match k.cmp(&left_size) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => {
                    k -= left_size + 1;
                    node.right.as_deref()
                }
            };
        }
        None
    }

    /// Returns the number of keys strictly less than `key`.
    /// `key` need not be present.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$
    pub fn rank(&self, key: &K) -> usize {
        let mut rank = 0;
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            if node.key < *key {
                rank += size(&node.left) + 1;
                cur = node.right.as_deref();
            } else {
                cur = node.left.as_deref();
            }
        }
        rank
    }

    /// Creates an iterator for enumerating keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// Gets the number of keys.
    pub fn len(&self) -> usize {
        size(&self.root)
    }

    /// Checks if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<K: Ord> FromIterator<K> for OrderStatisticsTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut ost = Self::new();
        for key in iter {
            ost.insert(key);
        }
        ost
    }
}

fn height<K>(link: &Link<K>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn size<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

fn update<K>(node: &mut Node<K>) {
    node.height = height(&node.left).max(height(&node.right)) + 1;
    node.size = size(&node.left) + size(&node.right) + 1;
}

fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    update(&mut node);
    pivot.right = Some(node);
    update(&mut pivot);
    pivot
}

fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    update(&mut node);
    pivot.left = Some(node);
    update(&mut pivot);
    pivot
}

/// Restores the AVL condition at `node`, whose subtrees are balanced.
fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    update(&mut node);
    let (lh, rh) = (height(&node.left), height(&node.right));
    if lh > rh + 1 {
        if let Some(left) = node.left.take() {
            node.left = Some(if height(&left.left) < height(&left.right) {
                rotate_left(left)
            } else {
                left
            });
        }
        rotate_right(node)
    } else if rh > lh + 1 {
        if let Some(right) = node.right.take() {
            node.right = Some(if height(&right.right) < height(&right.left) {
                rotate_right(right)
            } else {
                right
            });
        }
        rotate_left(node)
    } else {
        node
    }
}

fn insert<K: Ord>(link: Link<K>, key: K) -> (Box<Node<K>>, bool) {
    let Some(mut node) = link else {
        return (Box::new(Node::new(key)), true);
    };
    let inserted = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, inserted) = insert(node.left.take(), key);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert(node.right.take(), key);
            node.right = Some(child);
            inserted
        }
        Ordering::Equal => false,
    };
    if inserted {
        (rebalance(node), true)
    } else {
        (node, false)
    }
}

fn remove<K: Ord>(link: Link<K>, key: &K) -> (Link<K>, bool) {
    let Some(mut node) = link else {
        return (None, false);
    };
    match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, removed) = remove(node.left.take(), key);
            node.left = child;
            if removed {
                (Some(rebalance(node)), true)
            } else {
                (Some(node), false)
            }
        }
        Ordering::Greater => {
            let (child, removed) = remove(node.right.take(), key);
            node.right = child;
            if removed {
                (Some(rebalance(node)), true)
            } else {
                (Some(node), false)
            }
        }
        Ordering::Equal => {
            let Node { left, right, .. } = *node;
            match (left, right) {
                (None, right) => (right, true),
                (left, None) => (left, true),
                (Some(left), Some(right)) => {
                    let (rest, mut succ) = take_min(right);
                    succ.left = Some(left);
                    succ.right = rest;
                    (Some(rebalance(succ)), true)
                }
            }
        }
    }
}

/// Detaches the smallest node of the subtree, returning the rest and the detached node.
fn take_min<K>(mut node: Box<Node<K>>) -> (Link<K>, Box<Node<K>>) {
    match node.left.take() {
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
        None => {
            let rest = node.right.take();
            (rest, node)
        }
    }
}

/// Iterator for enumerating keys in ascending order, created by [`OrderStatisticsTree::iter()`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K: Ord> Iter<'a, K> {
    /// Creates a new iterator.
    pub fn new(ost: &'a OrderStatisticsTree<K>) -> Self {
        let mut it = Self {
            stack: Vec::new(),
            remaining: ost.len(),
        };
        it.push_left(ost.root.as_deref());
        it
    }

    fn push_left(&mut self, mut cur: Option<&'a Node<K>>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a, K: Ord> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    fn check_balanced<K>(link: &Link<K>) -> u32 {
        let Some(node) = link else {
            return 0;
        };
        let lh = check_balanced(&node.left);
        let rh = check_balanced(&node.right);
        assert!(lh.abs_diff(rh) <= 1);
        assert_eq!(node.height, lh.max(rh) + 1);
        assert_eq!(node.size, size(&node.left) + size(&node.right) + 1);
        node.height
    }

    #[test]
    fn test_insert_duplicate() {
        let mut ost = OrderStatisticsTree::new();
        assert!(ost.insert(3));
        assert!(!ost.insert(3));
        assert_eq!(ost.len(), 1);
        assert!(ost.contains(&3));
        assert!(!ost.remove(&4));
        assert!(ost.remove(&3));
        assert!(ost.is_empty());
    }

    #[test]
    fn test_rank_of_absent_key() {
        let ost: OrderStatisticsTree<i32> = [10, 20, 30].into_iter().collect();
        assert_eq!(ost.rank(&5), 0);
        assert_eq!(ost.rank(&25), 2);
        assert_eq!(ost.rank(&99), 3);
    }

    #[test]
    fn test_sorted_insertions_stay_balanced() {
        let ost: OrderStatisticsTree<u32> = (0..1024).collect();
        assert!(check_balanced(&ost.root) <= 11);
        assert_eq!(ost.iter().copied().collect::<Vec<_>>(), (0..1024).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_against_btreeset() {
        let mut rng = ChaChaRng::seed_from_u64(13);
        let mut ost = OrderStatisticsTree::new();
        let mut naive = BTreeSet::new();
        for _ in 0..3000 {
            let key = rng.gen_range(0..500u32);
            if rng.gen_bool(0.6) {
                assert_eq!(ost.insert(key), naive.insert(key));
            } else {
                assert_eq!(ost.remove(&key), naive.remove(&key));
            }
        }
        check_balanced(&ost.root);
        assert_eq!(ost.len(), naive.len());
        let sorted: Vec<u32> = naive.iter().copied().collect();
        for (k, x) in sorted.iter().enumerate() {
            assert_eq!(ost.select(k), Some(x));
            assert_eq!(ost.rank(x), k);
        }
        assert_eq!(ost.select(sorted.len()), None);
        assert!(ost.iter().eq(naive.iter()));
    }
}
