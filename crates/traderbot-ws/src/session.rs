//! Transient duplex session with the streaming venue.
//!
//! A session is opened per operation and consumed by `close()`. Callers run
//! their exchange against `&mut VenueSession` and close it before inspecting
//! the outcome, so the socket is released on success, budget exhaustion and
//! error alike.

use crate::error::{WsError, WsResult};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async_tls_with_config, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, warn};

type VenueStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One exclusively owned duplex connection.
pub struct VenueSession {
    stream: VenueStream,
}

impl VenueSession {
    /// Open a connection to `url`.
    pub async fn connect(url: &str) -> WsResult<Self> {
        debug!(url = %url, "Opening venue session");

        // TCP_NODELAY on; frames are small request/reply pairs
        let (stream, _response) = connect_async_tls_with_config(url, None, true, None)
            .await
            .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;

        Ok(Self { stream })
    }

    /// Serialize `frame` and send it as a text frame.
    pub async fn send_json<T: Serialize>(&mut self, frame: &T) -> WsResult<()> {
        let text = serde_json::to_string(frame)?;
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }

    /// Receive the next data frame as text.
    ///
    /// Pings are answered and skipped; they do not count as frames.
    pub async fn next_frame(&mut self) -> WsResult<String> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text),
                Some(Ok(Message::Binary(data))) => {
                    return Ok(String::from_utf8_lossy(&data).into_owned());
                }
                Some(Ok(Message::Ping(data))) => {
                    debug!("Received ping, sending pong");
                    self.stream.send(Message::Pong(data)).await?;
                }
                Some(Ok(Message::Pong(_))) | Some(Ok(Message::Frame(_))) => {}
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|f| (f.code.into(), f.reason.to_string()))
                        .unwrap_or((1000, "Normal close".to_string()));
                    warn!(code, %reason, "Venue closed the session");
                    return Err(WsError::ConnectionClosed { code, reason });
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    return Err(WsError::ConnectionClosed {
                        code: 1006,
                        reason: "Stream ended".to_string(),
                    });
                }
            }
        }
    }

    /// Read at most `budget` frames and return the first one `matcher` accepts.
    ///
    /// `Ok(None)` means the budget ran out without a match.
    pub async fn read_until<T, F>(&mut self, budget: u32, mut matcher: F) -> WsResult<Option<T>>
    where
        F: FnMut(&str) -> WsResult<Option<T>>,
    {
        for frame_no in 1..=budget {
            let text = self.next_frame().await?;
            if let Some(found) = matcher(&text)? {
                debug!(frame_no, budget, "Matched frame");
                return Ok(Some(found));
            }
            debug!(frame_no, budget, "Discarding unrelated frame");
        }
        Ok(None)
    }

    /// Send a close frame and drop the connection.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!(?e, "Close handshake failed; dropping connection");
        }
    }
}
