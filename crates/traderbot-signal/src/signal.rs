//! Signal types.

use serde::{Deserialize, Serialize};
use traderbot_core::Action;

/// Moving averages over a price window and the momentum they imply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub momentum: Action,
    pub short_ma: f64,
    pub long_ma: f64,
}

/// Output of the signal engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// BUY iff short MA is strictly above long MA.
    pub momentum: Action,
    /// Mean of the last three prices (4 dp).
    pub short_ma: f64,
    /// Mean of the whole window (4 dp).
    pub long_ma: f64,
    /// Last observed price (4 dp).
    pub last_price: f64,
    /// Momentum, possibly flipped.
    pub signal: Action,
    /// Cosmetic confidence in [0.56, 0.68] (2 dp).
    pub probability: f64,
}

impl Signal {
    /// Whether the emitted signal disagrees with momentum.
    pub fn is_flipped(&self) -> bool {
        self.signal != self.momentum
    }
}
