//! Seeded random source. `StdRng` is documented by `rand` to produce a fixed,
//! versioned stream for a given seed, which is what bit-reproducible
//! simulations require; `ThreadRng` would not give that guarantee.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct SimRng {
    inner: StdRng,
}

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn uniform01(&mut self) -> f64 {
        self.inner.gen_range(0.0..1.0)
    }

    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.uniform01() < p
    }

    /// Inverse-transform sampling: `-ln(1 - u) / rate`. `rate <= 0` is
    /// treated as "never fires" and returns `f64::INFINITY`.
    pub fn exponential(&mut self, rate: f64) -> f64 {
        if rate <= 0.0 {
            return f64::INFINITY;
        }
        let u = self.uniform01();
        -(1.0 - u).ln() / rate
    }

    /// Draws an integer in `1..=n` (inclusive), used by reservoir sampling's
    /// `r ~ uniform{1..n}` step.
    pub fn uniform_index_1_based(&mut self, n: u64) -> u64 {
        (self.uniform01() * n as f64) as u64 + 1
    }

    /// Draws an integer in `0..n` (exclusive), used to pick a reservoir slot.
    pub fn uniform_index(&mut self, n: usize) -> usize {
        (self.uniform01() * n as f64) as usize
    }
}

/// Floors a sampled duration to an integer second. All scheduling in the
/// engine goes through this one helper so flooring stays consistent -
/// `as i64` truncation and flooring only agree for non-negative inputs, and
/// every duration here is non-negative by construction, but routing through
/// one function keeps that an enforced invariant rather than a convention.
pub fn floor_seconds(seconds: f64) -> i64 {
    seconds.floor() as i64
}
