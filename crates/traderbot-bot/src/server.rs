//! HTTP server implementation using axum.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use traderbot_telemetry::Metrics;
use traderbot_venues::QuoteVenue;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::pipeline::TradePipeline;
use crate::types::{
    AssetsResponse, BinarySignalRequest, ErrorResponse, MomentumRequest, QuoteSignalRequest,
};

/// Banner served on `GET /`.
const HOME_BANNER: &str = "Traderbot API (Deriv, Upstox, Binance, momentum signals, scheduler)";

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<TradePipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<TradePipeline>) -> Self {
        Self { pipeline }
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/binary-assets", get(binary_assets))
        .route("/binance-signal", post(binance_signal))
        .route("/upstox-signal", post(upstox_signal))
        .route("/binary-signal", post(binary_signal))
        .route("/ml-signal", post(ml_signal))
        .route("/metrics", get(metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn home() -> &'static str {
    HOME_BANNER
}

async fn binary_assets(State(state): State<AppState>) -> Json<AssetsResponse> {
    Json(AssetsResponse {
        assets: state.pipeline.assets().await,
    })
}

async fn binance_signal(State(state): State<AppState>, body: Bytes) -> Response {
    quote_signal(state, QuoteVenue::Binance, body).await
}

async fn upstox_signal(State(state): State<AppState>, body: Bytes) -> Response {
    quote_signal(state, QuoteVenue::Upstox, body).await
}

async fn quote_signal(state: AppState, venue: QuoteVenue, body: Bytes) -> Response {
    let request: QuoteSignalRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };
    Json(state.pipeline.quote_signal(venue, request.symbol).await).into_response()
}

async fn binary_signal(State(state): State<AppState>, body: Bytes) -> Response {
    let request: BinarySignalRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };
    match state.pipeline.binary_signal(request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(e),
    }
}

async fn ml_signal(State(state): State<AppState>, body: Bytes) -> Response {
    let request: MomentumRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };
    match state.pipeline.momentum(&request.prices) {
        Ok(averages) => Json(averages).into_response(),
        Err(e) => error_response(e),
    }
}

async fn metrics() -> Response {
    match Metrics::render() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// Decode a JSON body; an empty body means "all defaults".
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::InvalidRequest(format!("Invalid JSON body: {e}")))
}

fn error_response(error: AppError) -> Response {
    let status = match &error {
        AppError::InvalidRequest(_) | AppError::Signal(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(%status, error = %error, "Request failed");
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Serve the HTTP surface until `shutdown` is cancelled.
pub async fn run_server(
    pipeline: Arc<TradePipeline>,
    config: ServerConfig,
    shutdown: CancellationToken,
) -> AppResult<()> {
    let app = create_router(AppState::new(pipeline));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}
