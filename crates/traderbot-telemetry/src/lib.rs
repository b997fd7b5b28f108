//! Prometheus metrics and structured logging for traderbot.
//!
//! - Structured logging with tracing (JSON in production, pretty otherwise)
//! - Prometheus counters for ticks, orders, quote fallbacks, signals and scheduler runs

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
