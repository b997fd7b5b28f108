//! Application configuration.
//!
//! Loaded once at startup from TOML, then overridden from the environment for
//! secrets. The resulting struct is immutable and handed to each component.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use traderbot_venues::{BinanceConfig, CatalogConfig, UpstoxConfig};
use traderbot_ws::StreamConfig;

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Deriv streaming venue and catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivConfig {
    /// WebSocket URL (without `app_id`).
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Application ID.
    #[serde(default)]
    pub app_id: String,
    /// API token (usually supplied via `DERIV_TOKEN`).
    #[serde(default)]
    pub token: String,
    /// Active symbols REST URL.
    #[serde(default = "default_assets_url")]
    pub assets_url: String,
    /// Delay between authorize and buy (ms). Default: 1000.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Frames read while waiting for a tick. Default: 3.
    #[serde(default = "default_tick_frame_budget")]
    pub tick_frame_budget: u32,
    /// Frames read while waiting for an order reply. Default: 5.
    #[serde(default = "default_order_frame_budget")]
    pub order_frame_budget: u32,
    /// Asset used when a request names none.
    #[serde(default = "default_asset")]
    pub default_asset: String,
    /// Timeframe echoed when a request names none.
    #[serde(default = "default_timeframe")]
    pub default_timeframe: String,
}

fn default_ws_url() -> String {
    "wss://ws.deriv.com/websockets/v3".to_string()
}

fn default_assets_url() -> String {
    "https://api.deriv.com/api/v1/active_symbols".to_string()
}

fn default_settle_delay_ms() -> u64 {
    1000
}

fn default_tick_frame_budget() -> u32 {
    3
}

fn default_order_frame_budget() -> u32 {
    5
}

fn default_asset() -> String {
    "frxEURUSD".to_string()
}

fn default_timeframe() -> String {
    "1m".to_string()
}

impl Default for DerivConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            app_id: String::new(),
            token: String::new(),
            assets_url: default_assets_url(),
            settle_delay_ms: default_settle_delay_ms(),
            tick_frame_budget: default_tick_frame_budget(),
            order_frame_budget: default_order_frame_budget(),
            default_asset: default_asset(),
            default_timeframe: default_timeframe(),
        }
    }
}

impl DerivConfig {
    /// Streaming session settings.
    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            url: self.ws_url.clone(),
            app_id: self.app_id.clone(),
            token: self.token.clone(),
            settle_delay_ms: self.settle_delay_ms,
            tick_frame_budget: self.tick_frame_budget,
            order_frame_budget: self.order_frame_budget,
        }
    }

    /// Asset catalog settings.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            assets_url: self.assets_url.clone(),
            app_id: self.app_id.clone(),
            ..Default::default()
        }
    }
}

/// Periodic scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the scheduler runs. Default: true.
    #[serde(default = "default_scheduler_enabled")]
    pub enabled: bool,
    /// Firing interval (seconds). Default: 900 (15 minutes).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Symbols visited on every firing.
    #[serde(default = "default_scheduler_symbols")]
    pub symbols: Vec<String>,
}

fn default_scheduler_enabled() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    900
}

fn default_scheduler_symbols() -> Vec<String> {
    vec![
        "frxEURUSD".to_string(),
        "BTCUSDT".to_string(),
        "RELIANCE".to_string(),
    ]
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_scheduler_enabled(),
            interval_secs: default_interval_secs(),
            symbols: default_scheduler_symbols(),
        }
    }
}

/// Order sizing for pipeline-dispatched orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Contract duration (minutes). Default: 1.
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
    /// Stake. Default: 1.
    #[serde(default = "default_amount")]
    pub amount: f64,
}

fn default_duration_minutes() -> u32 {
    1
}

fn default_amount() -> f64 {
    1.0
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration_minutes(),
            amount: default_amount(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub deriv: DerivConfig,
    #[serde(default)]
    pub binance: BinanceConfig,
    #[serde(default)]
    pub upstox: UpstoxConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub order: OrderConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `config/default.toml` is used
    /// if present and built-in defaults otherwise. Environment overrides and
    /// validation apply in every case.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML file without overrides.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply secret and deployment overrides from `lookup` (the environment
    /// in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(app_id) = lookup("DERIV_APP_ID") {
            self.deriv.app_id = app_id;
        }
        if let Some(token) = lookup("DERIV_TOKEN") {
            self.deriv.token = token;
        }
        if let Some(token) = lookup("UPSTOX_ACCESS_TOKEN") {
            self.upstox.access_token = token;
        }
        if let Some(port) = lookup("TRADERBOT_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Reject settings that would make a component unusable.
    pub fn validate(&self) -> AppResult<()> {
        if self.deriv.ws_url.is_empty() {
            return Err(AppError::Config("deriv.ws_url must not be empty".to_string()));
        }
        if self.deriv.tick_frame_budget == 0 || self.deriv.order_frame_budget == 0 {
            return Err(AppError::Config(
                "deriv frame budgets must be at least 1".to_string(),
            ));
        }
        if self.binance.base_url.is_empty() || self.upstox.base_url.is_empty() {
            return Err(AppError::Config("quote venue base_url must not be empty".to_string()));
        }
        if self.scheduler.enabled && self.scheduler.interval_secs == 0 {
            return Err(AppError::Config(
                "scheduler.interval_secs must be positive".to_string(),
            ));
        }
        if !(self.order.amount.is_finite() && self.order.amount > 0.0) {
            return Err(AppError::Config("order.amount must be positive".to_string()));
        }
        Ok(())
    }
}
