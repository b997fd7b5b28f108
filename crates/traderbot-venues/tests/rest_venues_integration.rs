//! REST venue integration tests.
//!
//! Serves canned venue responses from a local axum router and checks that
//! quote and catalog lookups parse them, and degrade to fallbacks otherwise.

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use tokio::net::TcpListener;
use traderbot_core::Asset;
use traderbot_venues::{
    AssetCatalog, BinanceConfig, CatalogConfig, QuoteFetcher, QuoteVenue, UpstoxConfig,
};

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn fetcher(binance_url: &str, upstox_url: &str) -> QuoteFetcher {
    QuoteFetcher::new(
        BinanceConfig {
            base_url: binance_url.to_string(),
            ..Default::default()
        },
        UpstoxConfig {
            base_url: upstox_url.to_string(),
            access_token: "upstox-token".to_string(),
            ..Default::default()
        },
    )
    .unwrap()
}

async fn binance_ticker(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("symbol").map(String::as_str) {
        Some("BTCUSDT") => (
            StatusCode::OK,
            Json(json!({"symbol": "BTCUSDT", "price": "67890.12"})),
        ),
        Some("ETHUSDT") => (
            StatusCode::OK,
            Json(json!({"symbol": "ETHUSDT", "price": "not-a-number"})),
        ),
        Some("NOPRICE") => (StatusCode::OK, Json(json!({"symbol": "NOPRICE"}))),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"code": -1121, "msg": "Invalid symbol."})),
        ),
    }
}

fn binance_router() -> Router {
    Router::new().route("/api/v3/ticker/price", get(binance_ticker))
}

async fn upstox_candles(
    Path((instrument, _to, _from)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer upstox-token");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"status": "error"})));
    }
    if instrument != "NSE_EQ|RELIANCE" {
        return (
            StatusCode::OK,
            Json(json!({"status": "success", "data": {"candles": []}})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "data": {
                "candles": [
                    ["2024-01-05T00:00:00+05:30", 2580.0, 2601.0, 2570.0, 2595.45, 1000, 0],
                    ["2024-01-04T00:00:00+05:30", 2560.0, 2590.0, 2550.0, 2579.1, 1000, 0]
                ]
            }
        })),
    )
}

fn upstox_router() -> Router {
    Router::new().route(
        "/v2/historical-candle/{instrument}/day/{to}/{from}",
        get(upstox_candles),
    )
}

// ============================================================================
// Quote fetcher
// ============================================================================

#[tokio::test]
async fn test_binance_quote_exact() {
    let base = serve(binance_router()).await;
    let quotes = fetcher(&base, &base);

    let price = quotes.fetch_quote(QuoteVenue::Binance, "BTCUSDT").await;
    assert_eq!(price, 67890.12);
}

#[tokio::test]
async fn test_binance_non_numeric_price_falls_back() {
    let base = serve(binance_router()).await;
    let quotes = fetcher(&base, &base);

    assert_eq!(quotes.fetch_quote(QuoteVenue::Binance, "ETHUSDT").await, 0.0);
    assert_eq!(quotes.fetch_quote(QuoteVenue::Binance, "NOPRICE").await, 0.0);
}

#[tokio::test]
async fn test_binance_error_status_falls_back() {
    let base = serve(binance_router()).await;
    let quotes = fetcher(&base, &base);

    assert_eq!(quotes.fetch_quote(QuoteVenue::Binance, "BOGUS").await, 0.0);
}

#[tokio::test]
async fn test_unreachable_venue_falls_back() {
    let quotes = fetcher("http://127.0.0.1:1", "http://127.0.0.1:1");

    assert_eq!(quotes.fetch_quote(QuoteVenue::Binance, "BTCUSDT").await, 0.0);
    assert_eq!(quotes.fetch_quote(QuoteVenue::Upstox, "RELIANCE").await, 0.0);
}

#[tokio::test]
async fn test_upstox_latest_close() {
    let base = serve(upstox_router()).await;
    let quotes = fetcher(&base, &base);

    let price = quotes.fetch_quote(QuoteVenue::Upstox, "RELIANCE").await;
    assert_eq!(price, 2595.45);
}

#[tokio::test]
async fn test_upstox_no_candles_falls_back() {
    let base = serve(upstox_router()).await;
    let quotes = fetcher(&base, &base);

    assert_eq!(quotes.fetch_quote(QuoteVenue::Upstox, "TCS").await, 0.0);
}

// ============================================================================
// Asset catalog
// ============================================================================

#[tokio::test]
async fn test_catalog_lists_active_symbols() {
    let router = Router::new().route(
        "/active_symbols",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            assert_eq!(params.get("product_type").map(String::as_str), Some("binary"));
            assert_eq!(params.get("app_id").map(String::as_str), Some("1089"));
            Json(json!({
                "active_symbols": [
                    {"symbol": "frxEURUSD", "display_name": "EUR/USD"},
                    {"symbol": "R_100", "display_name": "Volatility 100 Index"}
                ]
            }))
        }),
    );
    let base = serve(router).await;
    let catalog = AssetCatalog::new(CatalogConfig {
        assets_url: format!("{base}/active_symbols"),
        app_id: "1089".to_string(),
        ..Default::default()
    })
    .unwrap();

    let assets = catalog.list_assets().await;
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[1], Asset::new("R_100", "Volatility 100 Index"));
}

#[tokio::test]
async fn test_catalog_falls_back_when_unreachable() {
    let catalog = AssetCatalog::new(CatalogConfig {
        assets_url: "http://127.0.0.1:1/active_symbols".to_string(),
        ..Default::default()
    })
    .unwrap();

    let assets = catalog.list_assets().await;
    assert_eq!(assets, vec![Asset::new("frxEURUSD", "EUR/USD")]);
}

#[tokio::test]
async fn test_catalog_falls_back_on_empty_list() {
    let router = Router::new().route(
        "/active_symbols",
        get(|| async { Json(json!({"active_symbols": []})) }),
    );
    let base = serve(router).await;
    let catalog = AssetCatalog::new(CatalogConfig {
        assets_url: format!("{base}/active_symbols"),
        ..Default::default()
    })
    .unwrap();

    let assets = catalog.list_assets().await;
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].symbol, "frxEURUSD");
}
