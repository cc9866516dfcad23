//! Hash map keyed by a seeded splitmix64 hasher.
//!
//! The seed is drawn once per process from the system clock.
//!
//! # Examples
//!
//! ```
//! use cpds::hash_table::HashTable;
//!
//! let mut freq = HashTable::<u64, u32>::default();
//! for x in [1, 2, 1] {
//!     *freq.entry(x).or_default() += 1;
//! }
//! assert_eq!(freq.get(&1), Some(&2));
//! assert_eq!(freq.get(&5), None);
//! ```
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// [`HashMap`] hashing keys with [`SplitMixHasher`].
pub type HashTable<K, V> = HashMap<K, V, SplitMixState>;

/// Finalizer of the splitmix64 generator.
#[inline(always)]
pub const fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e3779b97f4a7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

fn process_seed() -> u64 {
    static SEED: OnceLock<u64> = OnceLock::new();
    *SEED.get_or_init(|| {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        log::debug!("seeded splitmix hasher with {nanos}");
        nanos
    })
}

/// [`BuildHasher`] producing [`SplitMixHasher`]s that share one seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMixState {
    seed: u64,
}

impl SplitMixState {
    /// Creates a builder with a fixed seed, giving reproducible hashes.
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for SplitMixState {
    /// Creates a builder with the per-process seed.
    fn default() -> Self {
        Self::with_seed(process_seed())
    }
}

impl BuildHasher for SplitMixState {
    type Hasher = SplitMixHasher;

    fn build_hasher(&self) -> SplitMixHasher {
        SplitMixHasher {
            seed: self.seed,
            state: 0,
        }
    }
}

/// Hasher mixing each 64-bit word into its state with [`splitmix64`].
///
/// Hashing a single `u64` key `x` yields `splitmix64(x + seed)`.
#[derive(Debug, Clone)]
pub struct SplitMixHasher {
    seed: u64,
    state: u64,
}

impl Hasher for SplitMixHasher {
    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.write_u64(u64::from_le_bytes(word));
        }
    }

    #[inline(always)]
    fn write_u64(&mut self, x: u64) {
        self.state = splitmix64(self.state.wrapping_add(x).wrapping_add(self.seed));
    }

    #[inline(always)]
    fn write_u32(&mut self, x: u32) {
        self.write_u64(u64::from(x));
    }

    #[inline(always)]
    fn write_usize(&mut self, x: usize) {
        self.write_u64(x as u64);
    }

    #[inline(always)]
    fn write_i64(&mut self, x: i64) {
        self.write_u64(x as u64);
    }

    #[inline(always)]
    fn write_i32(&mut self, x: i32) {
        self.write_u64(x as u64);
    }

    fn finish(&self) -> u64 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::hash::Hash;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    fn hash_one<K: Hash>(state: &SplitMixState, key: K) -> u64 {
        let mut h = state.build_hasher();
        key.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_splitmix64_reference() {
        // First outputs of the reference generator seeded with 0.
        assert_eq!(splitmix64(0), 0xe220a8397b1dcdaf);
        assert_eq!(splitmix64(0x9e3779b97f4a7c15), 0x6e789e6aa1b965f4);
    }

    #[test]
    fn test_single_word_hash() {
        let state = SplitMixState::with_seed(12345);
        assert_eq!(hash_one(&state, 7u64), splitmix64(7 + 12345));
    }

    #[test]
    fn test_seed_changes_hash() {
        let a = SplitMixState::with_seed(1);
        let b = SplitMixState::with_seed(2);
        assert_ne!(hash_one(&a, 42u64), hash_one(&b, 42u64));
        assert_eq!(SplitMixState::default(), SplitMixState::default());
    }

    #[test]
    fn test_string_keys() {
        let mut map = HashTable::<String, usize>::default();
        for w in "the quick brown fox jumps over the lazy dog the end".split(' ') {
            *map.entry(w.to_string()).or_default() += 1;
        }
        assert_eq!(map["the"], 3);
        assert_eq!(map["fox"], 1);
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn test_random_against_std() {
        let mut rng = ChaChaRng::seed_from_u64(99);
        let mut ours = HashTable::<i32, i64>::with_hasher(SplitMixState::with_seed(5));
        let mut std_map = HashMap::<i32, i64>::new();
        for _ in 0..10000 {
            let k = rng.gen_range(-500..500);
            let v = rng.gen_range(-1000..1000);
            *ours.entry(k).or_default() += v;
            *std_map.entry(k).or_default() += v;
        }
        assert_eq!(ours.len(), std_map.len());
        for (k, v) in &std_map {
            assert_eq!(ours.get(k), Some(v));
        }
    }
}
