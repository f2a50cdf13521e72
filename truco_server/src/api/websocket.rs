//! WebSocket push of store change events.
//!
//! Each connection subscribes to the store's broadcaster and receives every
//! [`ChangeEvent`] as a JSON text frame. Events carry no game state; clients
//! refetch what changed over HTTP.
//!
//! # Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8080/ws');
//!
//! ws.onmessage = (event) => {
//!   const change = JSON.parse(event.data);
//!   switch (change.type) {
//!     case 'game_list_changed': refetchGames(); break;
//!     case 'game_changed': refetchGame(change.game_id); break;
//!     case 'player_list_changed': refetchPlayers(change.game_id); break;
//!   }
//! };
//! ```

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info};
use tokio::sync::mpsc;
use truco::ChangeEvent;

use super::AppState;

/// Upgrade to a WebSocket streaming change events.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let events = state.broadcaster.subscribe(state.notify_channel_capacity);
    ws.on_upgrade(move |socket| forward_events(socket, events))
}

/// Forward events until either side goes away.
async fn forward_events(socket: WebSocket, mut events: mpsc::Receiver<ChangeEvent>) {
    info!("WebSocket subscriber connected");
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        error!("Failed to serialize {:?}: {}", event, e);
                        continue;
                    }
                };
                if sender.send(Message::Text(text.into())).await.is_err() {
                    debug!("WebSocket send failed, closing");
                    break;
                }
            }

            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Client frames carry nothing we act on.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    info!("WebSocket subscriber disconnected");
}
