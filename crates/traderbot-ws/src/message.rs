//! Streaming venue frame types.

use serde::Serialize;
use traderbot_core::{ContractType, DurationUnit, OrderRequest, Tick};

// ============================================================================
// Outgoing frames
// ============================================================================

/// `{"authorize": <token>}`
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizeRequest<'a> {
    pub authorize: &'a str,
}

impl<'a> AuthorizeRequest<'a> {
    pub fn new(token: &'a str) -> Self {
        Self { authorize: token }
    }
}

/// `{"ticks": <symbol>, "subscribe": 1}`
#[derive(Debug, Clone, Serialize)]
pub struct TicksRequest<'a> {
    pub ticks: &'a str,
    pub subscribe: u8,
}

impl<'a> TicksRequest<'a> {
    pub fn subscribe(symbol: &'a str) -> Self {
        Self {
            ticks: symbol,
            subscribe: 1,
        }
    }
}

/// `{"buy": <amount>, "parameters": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct BuyRequest<'a> {
    /// Stake. Whole amounts go out as JSON integers.
    pub buy: serde_json::Value,
    pub parameters: BuyParameters<'a>,
}

/// Contract parameters of a buy frame.
#[derive(Debug, Clone, Serialize)]
pub struct BuyParameters<'a> {
    pub contract_type: ContractType,
    pub symbol: &'a str,
    pub duration: u32,
    pub duration_unit: DurationUnit,
}

impl<'a> BuyRequest<'a> {
    pub fn from_order(order: &'a OrderRequest) -> Self {
        Self {
            buy: stake_value(order.amount),
            parameters: BuyParameters {
                contract_type: order.contract_type(),
                symbol: &order.symbol,
                duration: order.duration,
                duration_unit: DurationUnit::Minutes,
            },
        }
    }
}

fn stake_value(amount: f64) -> serde_json::Value {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        serde_json::Value::from(amount as i64)
    } else {
        serde_json::Value::from(amount)
    }
}

// ============================================================================
// Incoming frames
// ============================================================================

/// Decode a tick frame (`{"tick": {"quote": ..., "symbol": ...}}`).
///
/// Returns `None` for non-JSON frames, frames without a `tick` object, and
/// ticks whose quote is missing, not numeric or not finite.
pub fn parse_tick_frame(text: &str, requested_symbol: &str) -> Option<Tick> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let tick = value.get("tick")?.as_object()?;

    let quote = match tick.get("quote")? {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !quote.is_finite() {
        return None;
    }

    let symbol = tick
        .get("symbol")
        .and_then(|v| v.as_str())
        .unwrap_or(requested_symbol);

    Some(Tick::new(symbol, quote))
}

/// Whether a raw frame is a buy confirmation or a proposal.
///
/// Matches on the quoted markers so that e.g. `"buy_price"` alone does not count.
pub fn is_trade_response(text: &str) -> bool {
    text.contains("\"buy\"") || text.contains("\"proposal\"")
}
