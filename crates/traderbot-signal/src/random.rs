//! Pluggable randomness for the signal engine.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&self) -> f64;

    /// Uniform draw in `[low, high]`.
    fn uniform(&self, low: f64, high: f64) -> f64;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn uniform(&self, low: f64, high: f64) -> f64 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Deterministic generator for reproducible runs.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }

    fn uniform(&self, low: f64, high: f64) -> f64 {
        self.rng.lock().gen_range(low..=high)
    }
}
