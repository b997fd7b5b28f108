//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Venue error: {0}")]
    Venue(#[from] traderbot_venues::VenueError),

    #[error("Signal error: {0}")]
    Signal(#[from] traderbot_signal::SignalError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] traderbot_telemetry::TelemetryError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
