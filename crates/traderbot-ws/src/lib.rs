//! Streaming venue client.
//!
//! Every operation owns a transient duplex connection:
//! - `TickStreamClient`: authorize, subscribe, return the first tick (3-frame budget)
//! - `OrderDispatcher`: authorize, submit a buy, return the venue reply (5-frame budget)
//!
//! Connections are never shared between calls and are closed on every exit path.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod session;
pub mod tick_stream;

pub use config::StreamConfig;
pub use dispatcher::OrderDispatcher;
pub use error::{WsError, WsResult};
pub use message::{
    is_trade_response, parse_tick_frame, AuthorizeRequest, BuyParameters, BuyRequest,
    TicksRequest,
};
pub use session::VenueSession;
pub use tick_stream::TickStreamClient;

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Initialize the TLS crypto provider.
/// Must be called before any WebSocket connections are made.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
