//! REST venue clients.
//!
//! Best-effort reads whose public contracts never fail:
//! - `QuoteFetcher`: latest price from Binance or Upstox, 0.0 on any failure
//! - `AssetCatalog`: tradable symbols from Deriv, a default list on any failure

pub mod catalog;
pub mod config;
pub mod error;
pub mod quote;

pub use catalog::{fallback_assets, AssetCatalog};
pub use config::{BinanceConfig, CatalogConfig, UpstoxConfig};
pub use error::{VenueError, VenueResult};
pub use quote::{QuoteFetcher, QuoteVenue};

use reqwest::{Client, Response};

/// Build the shared HTTP client.
///
/// Uses transport defaults; no request timeout is configured.
pub(crate) fn build_http_client() -> VenueResult<Client> {
    Client::builder()
        .user_agent(concat!("traderbot/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| VenueError::HttpClient(format!("Failed to create HTTP client: {e}")))
}

/// Turn a non-success status into `VenueError::Status`.
pub(crate) async fn ensure_success(response: Response) -> VenueResult<Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(VenueError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
