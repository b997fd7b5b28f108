//! Latest-price lookup against REST quote venues.

use crate::{build_http_client, ensure_success};
use crate::config::{BinanceConfig, UpstoxConfig};
use crate::error::{VenueError, VenueResult};
use chrono::{Duration, Utc};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info};
use traderbot_telemetry::Metrics;

/// REST venue that can quote a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteVenue {
    /// Binance spot ticker.
    Binance,
    /// Upstox daily candles (Indian equities).
    Upstox,
}

impl QuoteVenue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binance => "binance",
            Self::Upstox => "upstox",
        }
    }
}

impl fmt::Display for QuoteVenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binance `/api/v3/ticker/price` body.
#[derive(Debug, Deserialize)]
struct TickerPriceResponse {
    #[serde(default)]
    price: Option<serde_json::Value>,
}

/// Upstox historical candle body.
#[derive(Debug, Deserialize)]
struct CandleResponse {
    #[serde(default)]
    data: Option<CandleData>,
}

#[derive(Debug, Deserialize)]
struct CandleData {
    /// `[timestamp, open, high, low, close, volume, oi]`
    #[serde(default)]
    candles: Vec<Vec<serde_json::Value>>,
}

/// Close is the fifth element of an Upstox candle.
const CANDLE_CLOSE_IDX: usize = 4;

/// Fetches a current price from a REST venue.
pub struct QuoteFetcher {
    client: Client,
    binance: BinanceConfig,
    upstox: UpstoxConfig,
}

impl QuoteFetcher {
    /// Create a quote fetcher for both venues.
    pub fn new(binance: BinanceConfig, upstox: UpstoxConfig) -> VenueResult<Self> {
        Ok(Self {
            client: build_http_client()?,
            binance,
            upstox,
        })
    }

    /// Latest price for `symbol` on `venue`.
    ///
    /// Never fails: network errors, non-success statuses and unparsable
    /// prices are logged and reported as 0.0.
    pub async fn fetch_quote(&self, venue: QuoteVenue, symbol: &str) -> f64 {
        let result = match venue {
            QuoteVenue::Binance => self.try_fetch_binance(symbol).await,
            QuoteVenue::Upstox => self.try_fetch_upstox(symbol).await,
        };

        match result {
            Ok(price) => {
                info!(%venue, symbol = %symbol, price, "Quote fetched");
                price
            }
            Err(e) => {
                error!(%venue, symbol = %symbol, error = %e, "Quote fetch failed, using 0.0");
                Metrics::quote_fallback(venue.as_str());
                0.0
            }
        }
    }

    async fn try_fetch_binance(&self, symbol: &str) -> VenueResult<f64> {
        let url = format!(
            "{}/api/v3/ticker/price",
            self.binance.base_url.trim_end_matches('/')
        );
        debug!(url = %url, symbol = %symbol, "Fetching Binance ticker");

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await
            .map_err(|e| VenueError::HttpClient(format!("HTTP request failed: {e}")))?;

        let body: TickerPriceResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| VenueError::HttpClient(format!("Failed to parse response: {e}")))?;

        let price = body.price.ok_or(VenueError::MissingField("price"))?;
        parse_price(&price)
    }

    async fn try_fetch_upstox(&self, symbol: &str) -> VenueResult<f64> {
        let to_date = Utc::now().date_naive();
        let from_date = to_date - Duration::days(self.upstox.lookback_days);
        let url = candle_url(
            &self.upstox.base_url,
            &self.upstox.instrument_key(symbol),
            &to_date.format("%Y-%m-%d").to_string(),
            &from_date.format("%Y-%m-%d").to_string(),
        )?;
        debug!(url = %url, "Fetching Upstox candles");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.upstox.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| VenueError::HttpClient(format!("HTTP request failed: {e}")))?;

        let body: CandleResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| VenueError::HttpClient(format!("Failed to parse response: {e}")))?;

        let candles = body.data.ok_or(VenueError::MissingField("data"))?.candles;
        latest_close(&candles).ok_or_else(|| VenueError::NoData(symbol.to_string()))?
    }
}

/// `{base}/v2/historical-candle/{instrument}/day/{to}/{from}` with every
/// segment percent-encoded.
fn candle_url(base: &str, instrument: &str, to: &str, from: &str) -> VenueResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| VenueError::HttpClient(format!("Invalid base URL {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| VenueError::HttpClient(format!("Base URL cannot hold a path: {base}")))?
        .pop_if_empty()
        .extend(["v2", "historical-candle", instrument, "day", to, from]);
    Ok(url)
}

/// Parse a price that may arrive as a JSON string or number.
fn parse_price(value: &serde_json::Value) -> VenueResult<f64> {
    let price = match value {
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| VenueError::InvalidPrice(s.clone()))?,
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| VenueError::InvalidPrice(n.to_string()))?,
        other => return Err(VenueError::InvalidPrice(other.to_string())),
    };

    if !price.is_finite() {
        return Err(VenueError::InvalidPrice(price.to_string()));
    }
    Ok(price)
}

/// Close of the candle with the latest timestamp.
///
/// Upstox orders candles newest first, but the order is not relied upon.
fn latest_close(candles: &[Vec<serde_json::Value>]) -> Option<VenueResult<f64>> {
    let latest = candles
        .iter()
        .filter(|c| c.len() > CANDLE_CLOSE_IDX)
        .max_by(|a, b| {
            let ts_a = a[0].as_str().unwrap_or_default();
            let ts_b = b[0].as_str().unwrap_or_default();
            ts_a.cmp(ts_b)
        })?;
    Some(parse_price(&latest[CANDLE_CLOSE_IDX]))
}
