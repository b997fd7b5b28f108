//! Shared fixtures for streaming venue integration tests.

pub mod mock_venue;
