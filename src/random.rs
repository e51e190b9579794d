//! Seedable random source
//!
//! Generation and dataset selection draw all of their randomness from a `PuzzleRng` so that
//! every result can be reproduced from a seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub struct PuzzleRng {
    inner: StdRng,
}

impl PuzzleRng {
    /// Create with a specific seed. The same seed always produces the same sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a usize in [0, len)
    pub fn gen_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty range");
        self.inner.gen_range(0, len)
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
