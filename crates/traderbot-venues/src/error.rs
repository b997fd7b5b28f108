//! Venue error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VenueError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("No data returned for {0}")]
    NoData(String),
}

pub type VenueResult<T> = Result<T, VenueError>;
