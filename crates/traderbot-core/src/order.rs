//! Order-related types.
//!
//! Provides the trade action, the venue contract type it maps to, and the
//! request/result pair exchanged with the order dispatcher.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Failure marker returned when no confirmation arrives for an order.
pub const TRADE_FAILED: &str = "trade failed";

/// Directional action: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    #[default]
    Buy,
    Sell,
}

impl Action {
    /// Returns the opposite action.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Venue contract type for this action.
    pub fn contract_type(&self) -> ContractType {
        match self {
            Self::Buy => ContractType::Call,
            Self::Sell => ContractType::Put,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Action {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(CoreError::InvalidAction(other.to_string())),
        }
    }
}

/// Binary contract type on the streaming venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractType {
    Call,
    Put,
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Contract duration unit. Orders are always placed in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DurationUnit {
    #[default]
    #[serde(rename = "m")]
    Minutes,
}

/// Order submitted to the streaming venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Venue symbol (e.g., "frxEURUSD").
    pub symbol: String,
    /// Trade direction.
    pub action: Action,
    /// Contract duration in minutes.
    pub duration: u32,
    /// Stake amount.
    pub amount: f64,
}

impl OrderRequest {
    pub fn new(symbol: impl Into<String>, action: Action, duration: u32, amount: f64) -> Self {
        Self {
            symbol: symbol.into(),
            action,
            duration,
            amount,
        }
    }

    pub fn contract_type(&self) -> ContractType {
        self.action.contract_type()
    }
}

/// Outcome of an order submission.
///
/// Serializes as the raw venue payload when the venue answered and as
/// `{"error": "trade failed"}` when it did not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderResult {
    /// Failure marker; no matching frame arrived or the transport failed.
    Failed { error: String },
    /// Venue buy/proposal reply, passed through untouched. May carry a
    /// top-level `error` when the venue rejected the contract.
    Reply(serde_json::Value),
}

impl OrderResult {
    pub fn failed() -> Self {
        Self::Failed {
            error: TRADE_FAILED.to_string(),
        }
    }

    /// Venue replied and did not reject the order.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Reply(_)) && self.venue_error().is_none()
    }

    /// Rejection reason from a venue reply with a top-level `error`.
    pub fn venue_error(&self) -> Option<&str> {
        let error = self.payload()?.get("error")?;
        Some(
            error
                .get("message")
                .and_then(|m| m.as_str())
                .or_else(|| error.as_str())
                .unwrap_or("unknown venue error"),
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Venue payload if the venue replied.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Reply(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_maps_to_contract_type() {
        assert_eq!(Action::Buy.contract_type(), ContractType::Call);
        assert_eq!(Action::Sell.contract_type(), ContractType::Put);
    }

    #[test]
    fn test_action_opposite() {
        assert_eq!(Action::Buy.opposite(), Action::Sell);
        assert_eq!(Action::Sell.opposite(), Action::Buy);
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("buy".parse::<Action>().unwrap(), Action::Buy);
        assert_eq!(" SELL ".parse::<Action>().unwrap(), Action::Sell);
        tokio_test::assert_err!("HOLD".parse::<Action>());
    }

    #[test]
    fn test_action_serde_uppercase() {
        assert_eq!(serde_json::to_value(Action::Buy).unwrap(), json!("BUY"));
        let parsed: Action = serde_json::from_value(json!("SELL")).unwrap();
        assert_eq!(parsed, Action::Sell);
    }

    #[test]
    fn test_duration_unit_wire_value() {
        assert_eq!(serde_json::to_value(DurationUnit::Minutes).unwrap(), json!("m"));
    }

    #[test]
    fn test_failed_result_serializes_marker() {
        let value = serde_json::to_value(OrderResult::failed()).unwrap();
        assert_eq!(value, json!({"error": "trade failed"}));
    }

    #[test]
    fn test_confirmed_result_passes_payload_through() {
        let payload = json!({"msg_type": "buy", "buy": {"contract_id": 42}});
        let result = OrderResult::Reply(payload.clone());
        assert!(result.is_confirmed());
        assert_eq!(result.venue_error(), None);
        assert_eq!(result.payload(), Some(&payload));
        assert_eq!(serde_json::to_value(&result).unwrap(), payload);
    }

    #[test]
    fn test_rejected_reply_is_not_confirmed() {
        let payload = json!({
            "echo_req": {"buy": 1, "parameters": {"contract_type": "CALL"}},
            "error": {"code": "InvalidContractProposal", "message": "Trading is not offered for this duration."},
            "msg_type": "buy"
        });
        let result = OrderResult::Reply(payload.clone());
        assert!(!result.is_confirmed());
        assert!(!result.is_failed());
        assert_eq!(
            result.venue_error(),
            Some("Trading is not offered for this duration.")
        );
        assert_eq!(serde_json::to_value(&result).unwrap(), payload);
    }

    #[test]
    fn test_failure_marker_has_no_venue_error() {
        assert_eq!(OrderResult::failed().venue_error(), None);
        assert!(!OrderResult::failed().is_confirmed());
    }
}
