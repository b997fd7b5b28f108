//! Moving-average momentum signal engine.
//!
//! Computes short/long moving averages over a price window, labels the
//! momentum, and emits a signal with injected noise:
//! - the signal is the opposite of momentum with probability 0.37
//! - the reported probability is a uniform draw in [0.56, 0.68]
//!
//! Randomness comes from a pluggable `RandomSource` so callers can pin it.

pub mod engine;
pub mod error;
pub mod random;
pub mod signal;

pub use engine::{
    moving_averages, SignalEngine, FLIP_THRESHOLD, PROBABILITY_MAX, PROBABILITY_MIN,
    SHORT_WINDOW,
};
pub use error::{SignalError, SignalResult};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use signal::{MovingAverages, Signal};
