//! Shared fixtures for pipeline integration tests.

pub mod echo_venue;
