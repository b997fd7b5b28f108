//! REST venue configuration.

use serde::{Deserialize, Serialize};

/// Binance spot ticker endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinanceConfig {
    /// API base URL.
    #[serde(default = "default_binance_base_url")]
    pub base_url: String,
    /// Symbol used when a request does not name one.
    #[serde(default = "default_binance_symbol")]
    pub default_symbol: String,
}

fn default_binance_base_url() -> String {
    "https://api.binance.com".to_string()
}

fn default_binance_symbol() -> String {
    "BTCUSDT".to_string()
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: default_binance_base_url(),
            default_symbol: default_binance_symbol(),
        }
    }
}

/// Upstox historical candle endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstoxConfig {
    /// API base URL.
    #[serde(default = "default_upstox_base_url")]
    pub base_url: String,
    /// Bearer token (usually supplied via `UPSTOX_ACCESS_TOKEN`).
    #[serde(default)]
    pub access_token: String,
    /// Instrument key prefix, e.g. `NSE_EQ`.
    #[serde(default = "default_exchange_segment")]
    pub exchange_segment: String,
    /// Days of daily candles requested; the latest close is used.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
    /// Symbol used when a request does not name one.
    #[serde(default = "default_upstox_symbol")]
    pub default_symbol: String,
}

fn default_upstox_base_url() -> String {
    "https://api.upstox.com".to_string()
}

fn default_exchange_segment() -> String {
    "NSE_EQ".to_string()
}

fn default_lookback_days() -> i64 {
    5
}

fn default_upstox_symbol() -> String {
    "RELIANCE".to_string()
}

impl Default for UpstoxConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstox_base_url(),
            access_token: String::new(),
            exchange_segment: default_exchange_segment(),
            lookback_days: default_lookback_days(),
            default_symbol: default_upstox_symbol(),
        }
    }
}

impl UpstoxConfig {
    /// Instrument key for `symbol` (e.g. `NSE_EQ|RELIANCE`).
    pub fn instrument_key(&self, symbol: &str) -> String {
        format!("{}|{}", self.exchange_segment, symbol)
    }
}

/// Deriv active-symbols endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Active symbols URL.
    #[serde(default = "default_assets_url")]
    pub assets_url: String,
    /// Product type filter.
    #[serde(default = "default_product_type")]
    pub product_type: String,
    /// Application ID sent as `app_id`.
    #[serde(default)]
    pub app_id: String,
}

fn default_assets_url() -> String {
    "https://api.deriv.com/api/v1/active_symbols".to_string()
}

fn default_product_type() -> String {
    "binary".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            assets_url: default_assets_url(),
            product_type: default_product_type(),
            app_id: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstox_instrument_key() {
        let config = UpstoxConfig::default();
        assert_eq!(config.instrument_key("RELIANCE"), "NSE_EQ|RELIANCE");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: UpstoxConfig = serde_json::from_str(r#"{"lookback_days": 10}"#).unwrap();
        assert_eq!(config.lookback_days, 10);
        assert_eq!(config.exchange_segment, "NSE_EQ");
        assert_eq!(config.base_url, "https://api.upstox.com");
    }
}
