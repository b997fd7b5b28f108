//! Scripted mock streaming venue.
//!
//! Accepts WebSocket connections, records every text frame the client sends,
//! and once the client has sent its two request frames (authorize + request)
//! plays back a fixed script.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Frames the client sends before the script starts.
const REQUEST_FRAMES: usize = 2;

/// What the venue does after the client's request frames.
#[derive(Debug, Clone)]
pub enum Script {
    /// Send these text frames in order, then stay open.
    Reply(Vec<String>),
    /// Close the connection immediately.
    HangUp,
}

/// A mock streaming venue for testing.
pub struct MockVenue {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    received: Arc<Mutex<Vec<String>>>,
    client_closes: Arc<Mutex<u32>>,
}

impl MockVenue {
    /// Start a mock venue on an available port.
    pub async fn start(script: Script) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let received: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let client_closes: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let received_clone = received.clone();
        let closes_clone = client_closes.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Ok((stream, _)) = listener.accept() => {
                        tokio::spawn(handle_connection(
                            stream,
                            script.clone(),
                            received_clone.clone(),
                            closes_clone.clone(),
                        ));
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            received,
            client_closes,
        }
    }

    /// WebSocket URL of the venue.
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Text frames received from clients, in order.
    pub async fn received_frames(&self) -> Vec<serde_json::Value> {
        self.received
            .lock()
            .await
            .iter()
            .map(|t| serde_json::from_str(t).unwrap())
            .collect()
    }

    /// Wait until at least `expected` clients have sent a close frame.
    pub async fn wait_for_client_closes(&self, expected: u32) -> bool {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if *self.client_closes.lock().await >= expected {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .is_ok()
    }

    /// Shutdown the venue.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn handle_connection(
    stream: TcpStream,
    script: Script,
    received: Arc<Mutex<Vec<String>>>,
    client_closes: Arc<Mutex<u32>>,
) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("WebSocket handshake failed: {}", e);
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();
    let mut request_frames = 0usize;

    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                received.lock().await.push(text);
                request_frames += 1;

                if request_frames == REQUEST_FRAMES {
                    match &script {
                        Script::Reply(frames) => {
                            for frame in frames {
                                let _ = write.send(Message::Text(frame.clone())).await;
                            }
                        }
                        Script::HangUp => {
                            let _ = write.send(Message::Close(None)).await;
                            break;
                        }
                    }
                }
            }
            Ok(Message::Ping(data)) => {
                let _ = write.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) => {
                *client_closes.lock().await += 1;
                break;
            }
            Err(_) => break,
            _ => {}
        }
    }
}
