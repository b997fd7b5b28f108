//! Signal and execution pipeline.
//!
//! One invocation fetches a tick, computes the signal, then dispatches the
//! order. The tick connection is closed before the order connection opens.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::types::{BinarySignalRequest, BinarySignalResponse, MlInfo, QuoteSignalResponse};
use chrono::Utc;
use tracing::info;
use traderbot_core::{Action, Asset, OrderRequest};
use traderbot_signal::{moving_averages, MovingAverages, SignalEngine};
use traderbot_venues::{AssetCatalog, QuoteFetcher, QuoteVenue};
use traderbot_ws::{OrderDispatcher, TickStreamClient};

/// Fallbacks for fields a request leaves out.
#[derive(Debug, Clone)]
struct RequestDefaults {
    asset: String,
    timeframe: String,
    binance_symbol: String,
    upstox_symbol: String,
    duration_minutes: u32,
    amount: f64,
}

/// Venue clients and the signal engine behind every inbound operation.
pub struct TradePipeline {
    ticks: TickStreamClient,
    dispatcher: OrderDispatcher,
    engine: SignalEngine,
    quotes: QuoteFetcher,
    catalog: AssetCatalog,
    defaults: RequestDefaults,
}

impl TradePipeline {
    /// Build every component from `config`.
    pub fn from_config(config: &AppConfig, engine: SignalEngine) -> AppResult<Self> {
        let stream = config.deriv.stream_config();

        Ok(Self {
            ticks: TickStreamClient::new(stream.clone()),
            dispatcher: OrderDispatcher::new(stream),
            engine,
            quotes: QuoteFetcher::new(config.binance.clone(), config.upstox.clone())?,
            catalog: AssetCatalog::new(config.deriv.catalog_config())?,
            defaults: RequestDefaults {
                asset: config.deriv.default_asset.clone(),
                timeframe: config.deriv.default_timeframe.clone(),
                binance_symbol: config.binance.default_symbol.clone(),
                upstox_symbol: config.upstox.default_symbol.clone(),
                duration_minutes: config.order.duration_minutes,
                amount: config.order.amount,
            },
        })
    }

    /// Tick → signal → order for one binary-options asset.
    ///
    /// Venue failures degrade fields (last_price 0.0, failed trade marker)
    /// instead of failing the call; only a malformed action is rejected.
    pub async fn binary_signal(
        &self,
        request: BinarySignalRequest,
    ) -> AppResult<BinarySignalResponse> {
        let action = match request.action.as_deref() {
            Some(raw) => raw
                .parse::<Action>()
                .map_err(|e| AppError::InvalidRequest(e.to_string()))?,
            None => Action::Buy,
        };
        let asset = request.asset.unwrap_or_else(|| self.defaults.asset.clone());
        let timeframe = request
            .timeframe
            .unwrap_or_else(|| self.defaults.timeframe.clone());

        let last_price = self
            .ticks
            .fetch_tick(&asset)
            .await
            .map(|tick| tick.quote)
            .unwrap_or(0.0);

        let series = self.engine.synthesize_series(last_price);
        let signal = self.engine.compute_signal(&series, last_price)?;

        let order = OrderRequest::new(
            asset.clone(),
            action,
            self.defaults.duration_minutes,
            self.defaults.amount,
        );
        let trade = self.dispatcher.submit_order(&order).await;

        info!(
            asset = %asset,
            action = %action,
            last_price,
            momentum = %signal.momentum,
            signal = %signal.signal,
            probability = signal.probability,
            trade_ok = trade.is_confirmed(),
            "Binary signal pipeline finished"
        );

        Ok(BinarySignalResponse {
            asset,
            timeframe,
            action,
            last_price,
            signal: signal.signal,
            probability: signal.probability,
            ml: MlInfo::from(&signal),
            trade,
            time: Utc::now(),
        })
    }

    /// Price from a REST venue plus a coin-flip direction.
    pub async fn quote_signal(&self, venue: QuoteVenue, symbol: Option<String>) -> QuoteSignalResponse {
        let symbol = symbol.unwrap_or_else(|| match venue {
            QuoteVenue::Binance => self.defaults.binance_symbol.clone(),
            QuoteVenue::Upstox => self.defaults.upstox_symbol.clone(),
        });

        let price = self.quotes.fetch_quote(venue, &symbol).await;
        let signal = self.engine.coin_flip();

        QuoteSignalResponse {
            symbol,
            price,
            signal,
            time: Utc::now(),
        }
    }

    /// Deterministic moving-average momentum for caller-supplied prices.
    pub fn momentum(&self, prices: &[f64]) -> AppResult<MovingAverages> {
        let averages = moving_averages(prices)?;
        info!(
            momentum = %averages.momentum,
            short = averages.short_ma,
            long = averages.long_ma,
            "Momentum computed"
        );
        Ok(averages)
    }

    /// Tradable assets from the streaming venue's catalog.
    pub async fn assets(&self) -> Vec<Asset> {
        self.catalog.list_assets().await
    }
}
