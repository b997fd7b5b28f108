//! Signal engine error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SignalError {
    #[error("Empty price series")]
    EmptySeries,
}

pub type SignalResult<T> = Result<T, SignalError>;
