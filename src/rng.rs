//! Injected randomness for game resolution.
//!
//! Resolvers never touch a global RNG; every draw flows through a
//! [`RandomSource`] handed in by the caller. Production code passes
//! [`ThreadRandom`], replays and tests pass [`SeededRandom`] or
//! [`ScriptedRandom`].

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::VecDeque;

/// Source of uniform random draws.
pub trait RandomSource: Send {
    /// Draw a raw u64 (full range).
    fn next_u64(&mut self) -> u64;

    /// Draw a u64 in `[0, n)`. `n` must be > 0.
    fn next_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.next_u64() % n
    }

    /// Pick an index with probability proportional to its weight.
    /// Weights must not all be zero.
    fn pick_weighted(&mut self, weights: &[u64]) -> usize {
        let total: u64 = weights.iter().sum();
        assert!(total > 0, "weights must not all be zero");
        let mut roll = self.next_below(total);
        for (index, weight) in weights.iter().enumerate() {
            if roll < *weight {
                return index;
            }
            roll -= weight;
        }
        weights.len() - 1
    }
}

/// Operating-system entropy via the thread-local generator.
#[derive(Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_u64(&mut self) -> u64 {
        rand::thread_rng().next_u64()
    }
}

/// Deterministic generator from a fixed seed, for reproducible runs.
pub struct SeededRandom {
    inner: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

/// Replays a fixed script of values, then yields zeros once exhausted.
/// Used to force specific game outcomes in tests.
pub struct ScriptedRandom {
    script: VecDeque<u64>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u64(&mut self) -> u64 {
        self.script.pop_front().unwrap_or(0)
    }
}
