//! Request and response payloads for the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use traderbot_core::{Action, Asset, OrderResult};
use traderbot_signal::Signal;

/// Body of `POST /binary-signal`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BinarySignalRequest {
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    /// `BUY` or `SELL`, case-insensitive.
    #[serde(default)]
    pub action: Option<String>,
}

/// Momentum details reported alongside a binary signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlInfo {
    pub momentum: Action,
    pub short_ma: f64,
    pub long_ma: f64,
    pub last_price: f64,
}

impl From<&Signal> for MlInfo {
    fn from(signal: &Signal) -> Self {
        Self {
            momentum: signal.momentum,
            short_ma: signal.short_ma,
            long_ma: signal.long_ma,
            last_price: signal.last_price,
        }
    }
}

/// Result of one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinarySignalResponse {
    pub asset: String,
    pub timeframe: String,
    pub action: Action,
    /// Tick quote, or 0.0 when no tick arrived.
    pub last_price: f64,
    pub signal: Action,
    pub probability: f64,
    pub ml: MlInfo,
    pub trade: OrderResult,
    pub time: DateTime<Utc>,
}

/// Body of `POST /binance-signal` and `POST /upstox-signal`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteSignalRequest {
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSignalResponse {
    pub symbol: String,
    /// Venue price, or 0.0 on failure.
    pub price: f64,
    pub signal: Action,
    pub time: DateTime<Utc>,
}

/// Body of `POST /ml-signal`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MomentumRequest {
    #[serde(default)]
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsResponse {
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
