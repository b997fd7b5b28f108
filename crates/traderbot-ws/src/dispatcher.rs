//! Order submission over a transient session.

use crate::config::StreamConfig;
use crate::error::{WsError, WsResult};
use crate::message::{is_trade_response, AuthorizeRequest, BuyRequest};
use crate::session::VenueSession;
use std::time::Duration;
use tracing::{error, info, warn};
use traderbot_core::{OrderRequest, OrderResult};
use traderbot_telemetry::Metrics;

/// Submits buy instructions to the streaming venue.
#[derive(Debug, Clone)]
pub struct OrderDispatcher {
    config: StreamConfig,
}

impl OrderDispatcher {
    pub fn new(config: StreamConfig) -> Self {
        Self { config }
    }

    /// Submit `order` and return the venue reply.
    ///
    /// Venue rejections are passed through as replies. Returns
    /// `OrderResult::failed()` when the order frame budget runs out or the
    /// transport fails. No retry happens within a call.
    pub async fn submit_order(&self, order: &OrderRequest) -> OrderResult {
        match self.try_submit(order).await {
            Ok(Some(payload)) => {
                let result = OrderResult::Reply(payload);
                match result.venue_error() {
                    Some(reason) => {
                        warn!(
                            symbol = %order.symbol,
                            action = %order.action,
                            reason = %reason,
                            "Order rejected by venue"
                        );
                        Metrics::order_rejected();
                    }
                    None => {
                        info!(
                            symbol = %order.symbol,
                            action = %order.action,
                            amount = order.amount,
                            "Order acknowledged by venue"
                        );
                        Metrics::order_confirmed();
                    }
                }
                result
            }
            Ok(None) => {
                warn!(
                    symbol = %order.symbol,
                    budget = self.config.order_frame_budget,
                    "No buy/proposal frame within budget"
                );
                Metrics::order_failed();
                OrderResult::failed()
            }
            Err(e) => {
                error!(symbol = %order.symbol, error = %e, "Order dispatch failed");
                Metrics::order_failed();
                OrderResult::failed()
            }
        }
    }

    async fn try_submit(&self, order: &OrderRequest) -> WsResult<Option<serde_json::Value>> {
        let mut session = VenueSession::connect(&self.config.endpoint()).await?;
        let outcome = self.exchange(&mut session, order).await;
        session.close().await;
        outcome
    }

    async fn exchange(
        &self,
        session: &mut VenueSession,
        order: &OrderRequest,
    ) -> WsResult<Option<serde_json::Value>> {
        session
            .send_json(&AuthorizeRequest::new(&self.config.token))
            .await?;

        // Let the authorization settle before trading
        tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;

        session.send_json(&BuyRequest::from_order(order)).await?;

        session
            .read_until(self.config.order_frame_budget, |text| {
                if !is_trade_response(text) {
                    return Ok(None);
                }
                serde_json::from_str(text)
                    .map(Some)
                    .map_err(|e| WsError::ParseError(format!("trade response: {e}")))
            })
            .await
    }
}
