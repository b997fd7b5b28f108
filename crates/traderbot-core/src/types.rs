//! Market data observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single point-in-time price observation for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Venue symbol.
    pub symbol: String,
    /// Quoted price.
    pub quote: f64,
    /// Local receive time.
    pub received_at: DateTime<Utc>,
}

impl Tick {
    /// Create a tick stamped with the current time.
    pub fn new(symbol: impl Into<String>, quote: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quote,
            received_at: Utc::now(),
        }
    }
}

/// Tradable symbol reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: String,
    pub display_name: String,
}

impl Asset {
    pub fn new(symbol: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
        }
    }
}
