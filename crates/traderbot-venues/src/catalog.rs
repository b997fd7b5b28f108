//! Tradable symbol catalog.

use crate::{build_http_client, ensure_success};
use crate::config::CatalogConfig;
use crate::error::{VenueError, VenueResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info, warn};
use traderbot_core::Asset;
use traderbot_telemetry::Metrics;

/// Symbol returned when the catalog cannot be fetched.
pub const FALLBACK_SYMBOL: &str = "frxEURUSD";
const FALLBACK_DISPLAY_NAME: &str = "EUR/USD";

/// Single-entry list served when the venue is unavailable.
pub fn fallback_assets() -> Vec<Asset> {
    vec![Asset::new(FALLBACK_SYMBOL, FALLBACK_DISPLAY_NAME)]
}

/// Raw active-symbol entry from the venue.
#[derive(Debug, Deserialize)]
struct RawSymbolEntry {
    symbol: Option<String>,
    display_name: Option<String>,
}

/// Fetches the tradable symbol list on every call; nothing is cached.
pub struct AssetCatalog {
    client: Client,
    config: CatalogConfig,
}

impl AssetCatalog {
    pub fn new(config: CatalogConfig) -> VenueResult<Self> {
        Ok(Self {
            client: build_http_client()?,
            config,
        })
    }

    /// Current tradable assets. Never empty.
    pub async fn list_assets(&self) -> Vec<Asset> {
        match self.try_list_assets().await {
            Ok(assets) if !assets.is_empty() => {
                info!(count = assets.len(), "Fetched asset catalog");
                assets
            }
            Ok(_) => {
                warn!("Asset catalog empty, serving fallback");
                Metrics::catalog_fallback();
                fallback_assets()
            }
            Err(e) => {
                error!(error = %e, "Asset catalog fetch failed, serving fallback");
                Metrics::catalog_fallback();
                fallback_assets()
            }
        }
    }

    async fn try_list_assets(&self) -> VenueResult<Vec<Asset>> {
        let response = self
            .client
            .get(&self.config.assets_url)
            .query(&[
                ("product_type", self.config.product_type.as_str()),
                ("app_id", self.config.app_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| VenueError::HttpClient(format!("HTTP request failed: {e}")))?;

        let body: serde_json::Value = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| VenueError::HttpClient(format!("Failed to parse response: {e}")))?;

        parse_catalog(body)
    }
}

/// Accepts `{"active_symbols": [...]}` or a bare array.
/// Entries that are malformed or lack a symbol or display name are skipped.
fn parse_catalog(body: serde_json::Value) -> VenueResult<Vec<Asset>> {
    let entries = match body {
        serde_json::Value::Array(entries) => entries,
        serde_json::Value::Object(mut map) => match map.remove("active_symbols") {
            Some(serde_json::Value::Array(entries)) => entries,
            _ => return Err(VenueError::MissingField("active_symbols")),
        },
        _ => return Err(VenueError::MissingField("active_symbols")),
    };

    let mut assets = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        let raw = match serde_json::from_value::<RawSymbolEntry>(entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(idx, error = %e, "Skipping malformed symbol entry");
                continue;
            }
        };
        match (raw.symbol, raw.display_name) {
            (Some(symbol), Some(display_name)) if !symbol.is_empty() => {
                assets.push(Asset::new(symbol, display_name));
            }
            _ => warn!(idx, "Skipping incomplete symbol entry"),
        }
    }
    Ok(assets)
}
