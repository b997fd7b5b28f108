//! Mock streaming venue that answers by request type.
//!
//! - `authorize` → authorize reply
//! - `ticks` → one tick at a fixed quote
//! - `buy` → buy confirmation echoing the contract parameters
//!
//! Every connection is logged in arrival order with the frames it carried.

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::{accept_async, tungstenite::Message};

pub struct EchoVenue {
    addr: SocketAddr,
    connections: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl EchoVenue {
    pub async fn start(quote: f64) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections: Arc<Mutex<Vec<Vec<Value>>>> = Arc::new(Mutex::new(Vec::new()));

        let connections_clone = connections.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let slot = {
                    let mut conns = connections_clone.lock().await;
                    conns.push(Vec::new());
                    conns.len() - 1
                };
                tokio::spawn(handle_connection(stream, quote, slot, connections_clone.clone()));
            }
        });

        Self { addr, connections }
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Frames received, grouped per connection in arrival order.
    pub async fn connections(&self) -> Vec<Vec<Value>> {
        self.connections.lock().await.clone()
    }
}

async fn handle_connection(
    stream: TcpStream,
    quote: f64,
    slot: usize,
    connections: Arc<Mutex<Vec<Vec<Value>>>>,
) {
    let Ok(ws_stream) = accept_async(stream).await else {
        return;
    };
    let (mut write, mut read) = ws_stream.split();

    while let Some(Ok(msg)) = read.next().await {
        let Message::Text(text) = msg else {
            if msg.is_close() {
                break;
            }
            continue;
        };
        let frame: Value = serde_json::from_str(&text).unwrap();
        connections.lock().await[slot].push(frame.clone());

        let reply = if frame.get("authorize").is_some() {
            json!({"msg_type": "authorize", "authorize": {"loginid": "VRTC42"}})
        } else if let Some(symbol) = frame.get("ticks") {
            json!({"msg_type": "tick", "tick": {"symbol": symbol, "quote": quote}})
        } else if frame.get("buy").is_some() {
            json!({
                "msg_type": "buy",
                "buy": {"contract_id": 7001, "longcode": frame["parameters"]["contract_type"]}
            })
        } else {
            continue;
        };
        let _ = write.send(Message::Text(reply.to_string())).await;
    }
}
