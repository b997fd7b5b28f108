//! Core domain types for the traderbot venue pipeline.
//!
//! This crate provides the types shared by every venue client:
//! - `Action`, `ContractType`, `DurationUnit`: Trading enums
//! - `Tick`, `Asset`: Market data observations
//! - `OrderRequest`, `OrderResult`: Order dispatch input and outcome

pub mod error;
pub mod order;
pub mod precision;
pub mod types;

pub use error::{CoreError, Result};
pub use order::{Action, ContractType, DurationUnit, OrderRequest, OrderResult, TRADE_FAILED};
pub use precision::round_dp;
pub use types::{Asset, Tick};
