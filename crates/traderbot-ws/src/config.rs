//! Streaming venue configuration.

/// Connection and protocol settings for the streaming venue.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// WebSocket URL without the `app_id` query parameter.
    pub url: String,
    /// Application ID appended as `?app_id=`.
    pub app_id: String,
    /// API token sent in the authorize frame.
    pub token: String,
    /// Delay between authorize and buy frames (ms).
    pub settle_delay_ms: u64,
    /// Frames read while waiting for a tick.
    pub tick_frame_budget: u32,
    /// Frames read while waiting for a buy/proposal reply.
    pub order_frame_budget: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: "wss://ws.deriv.com/websockets/v3".to_string(),
            app_id: String::new(),
            token: String::new(),
            settle_delay_ms: 1000,
            tick_frame_budget: 3,
            order_frame_budget: 5,
        }
    }
}

impl StreamConfig {
    /// Full connection URL including the application ID.
    pub fn endpoint(&self) -> String {
        if self.app_id.is_empty() {
            return self.url.clone();
        }
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}app_id={}", self.url, separator, self.app_id)
    }
}
