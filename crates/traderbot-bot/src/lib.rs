//! Traderbot signal and order-dispatch service.
//!
//! Wires the venue clients into one pipeline:
//! - Tick fetch from the streaming venue
//! - Momentum signal computation
//! - Order dispatch back to the streaming venue
//! - REST quote signals, asset catalog and a periodic scheduler
//! - HTTP surface (axum)

pub mod app;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scheduler;
pub mod server;
pub mod types;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use pipeline::TradePipeline;
pub use scheduler::Scheduler;
