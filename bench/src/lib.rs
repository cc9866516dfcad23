//! Input generators shared by the timing benchmarks.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

/// Generates `len` random values in `[min, max]`.
pub fn gen_random_ints(len: usize, min: i64, max: i64, seed: u64) -> Vec<i64> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(min..=max)).collect()
}

/// Generates `num` random non-empty ranges `(lo, hi)` with `1 <= lo <= hi <= len`.
pub fn gen_random_ranges(len: usize, num: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..num)
        .map(|_| {
            let lo = rng.gen_range(1..=len);
            (lo, rng.gen_range(lo..=len))
        })
        .collect()
}
