//! Latest-tick lookup over a transient subscription.

use crate::config::StreamConfig;
use crate::error::WsResult;
use crate::message::{parse_tick_frame, AuthorizeRequest, TicksRequest};
use crate::session::VenueSession;
use tracing::{info, warn};
use traderbot_core::Tick;
use traderbot_telemetry::Metrics;

/// Fetches one tick per call from the streaming venue.
#[derive(Debug, Clone)]
pub struct TickStreamClient {
    config: StreamConfig,
}

impl TickStreamClient {
    pub fn new(config: StreamConfig) -> Self {
        Self { config }
    }

    /// Return the first tick for `symbol` within the tick frame budget.
    ///
    /// Never fails: transport errors and budget exhaustion both yield `None`.
    pub async fn fetch_tick(&self, symbol: &str) -> Option<Tick> {
        match self.try_fetch_tick(symbol).await {
            Ok(Some(tick)) => {
                info!(symbol = %symbol, quote = tick.quote, "Tick received");
                Metrics::tick_received();
                Some(tick)
            }
            Ok(None) => {
                warn!(
                    symbol = %symbol,
                    budget = self.config.tick_frame_budget,
                    "No tick within frame budget"
                );
                Metrics::tick_missed();
                None
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Tick fetch failed");
                Metrics::tick_missed();
                None
            }
        }
    }

    async fn try_fetch_tick(&self, symbol: &str) -> WsResult<Option<Tick>> {
        let mut session = VenueSession::connect(&self.config.endpoint()).await?;
        let outcome = self.exchange(&mut session, symbol).await;
        session.close().await;
        outcome
    }

    async fn exchange(&self, session: &mut VenueSession, symbol: &str) -> WsResult<Option<Tick>> {
        session
            .send_json(&AuthorizeRequest::new(&self.config.token))
            .await?;
        session.send_json(&TicksRequest::subscribe(symbol)).await?;

        session
            .read_until(self.config.tick_frame_budget, |text| {
                Ok(parse_tick_frame(text, symbol))
            })
            .await
    }
}
