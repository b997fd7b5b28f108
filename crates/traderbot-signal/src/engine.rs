//! Momentum signal computation.

use crate::error::{SignalError, SignalResult};
use crate::random::{RandomSource, ThreadRandom};
use crate::signal::{MovingAverages, Signal};
use std::sync::Arc;
use tracing::debug;
use traderbot_core::{round_dp, Action};
use traderbot_telemetry::Metrics;

/// Prices in the short moving-average window.
pub const SHORT_WINDOW: usize = 3;
/// Draws at or below this value flip the signal.
pub const FLIP_THRESHOLD: f64 = 0.37;
pub const PROBABILITY_MIN: f64 = 0.56;
pub const PROBABILITY_MAX: f64 = 0.68;

/// Points in a synthesized series.
const SYNTHETIC_POINTS: usize = 12;
const SYNTHETIC_JITTER_LOW: f64 = -0.4;
const SYNTHETIC_JITTER_HIGH: f64 = 0.5;

const PRICE_DP: u32 = 4;
const PROBABILITY_DP: u32 = 2;

/// Short/long moving averages and momentum, unrounded.
///
/// Short window is the last `SHORT_WINDOW` prices, or the whole series when
/// it is shorter. Equal averages count as SELL.
pub fn moving_averages(prices: &[f64]) -> SignalResult<MovingAverages> {
    if prices.is_empty() {
        return Err(SignalError::EmptySeries);
    }

    let short = &prices[prices.len().saturating_sub(SHORT_WINDOW)..];
    let short_ma = mean(short);
    let long_ma = mean(prices);

    let momentum = if short_ma > long_ma {
        Action::Buy
    } else {
        Action::Sell
    };

    Ok(MovingAverages {
        momentum,
        short_ma,
        long_ma,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Derives signals from price windows.
#[derive(Clone)]
pub struct SignalEngine {
    random: Arc<dyn RandomSource>,
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl SignalEngine {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Compute the signal for `prices`.
    pub fn compute_signal(&self, prices: &[f64], last_price: f64) -> SignalResult<Signal> {
        let averages = moving_averages(prices)?;

        let draw = self.random.next_unit();
        let signal = if draw <= FLIP_THRESHOLD {
            averages.momentum.opposite()
        } else {
            averages.momentum
        };

        let probability = round_dp(
            self.random.uniform(PROBABILITY_MIN, PROBABILITY_MAX),
            PROBABILITY_DP,
        );

        debug!(
            momentum = %averages.momentum,
            signal = %signal,
            short_ma = averages.short_ma,
            long_ma = averages.long_ma,
            flip_draw = draw,
            "Signal computed"
        );
        Metrics::signal_emitted(
            &averages.momentum.to_string(),
            &signal.to_string(),
        );

        Ok(Signal {
            momentum: averages.momentum,
            short_ma: round_dp(averages.short_ma, PRICE_DP),
            long_ma: round_dp(averages.long_ma, PRICE_DP),
            last_price: round_dp(last_price, PRICE_DP),
            signal,
            probability,
        })
    }

    /// Build a jittered window around `last_price` for venues that only
    /// deliver a single tick.
    pub fn synthesize_series(&self, last_price: f64) -> Vec<f64> {
        (0..SYNTHETIC_POINTS)
            .map(|_| last_price + self.random.uniform(SYNTHETIC_JITTER_LOW, SYNTHETIC_JITTER_HIGH))
            .collect()
    }

    /// Coin-flip direction: BUY iff a unit draw exceeds one half.
    pub fn coin_flip(&self) -> Action {
        if self.random.next_unit() > 0.5 {
            Action::Buy
        } else {
            Action::Sell
        }
    }
}
