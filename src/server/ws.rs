//! WebSocket bridge between the subscriber registry and dashboard clients

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::routes::AppState;
use crate::types::WsMessage;

pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// One task per client. The registry writes into an unbounded channel, so a
/// slow socket backs up its own queue without stalling the simulation timer.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    info!("WebSocket client connected");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let id = state.registry.subscribe(tx).await;

    // Hand the client the current prices right away; opportunity data only
    // flows on subsequent ticks.
    let hello = WsMessage::PriceUpdate(state.monitor.current_prices().await);
    if send_message(&mut socket, &hello).await.is_err() {
        state.registry.unsubscribe(id).await;
        return;
    }

    loop {
        tokio::select! {
            published = rx.recv() => {
                let Some(message) = published else {
                    break;
                };
                if send_message(&mut socket, &message).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // No client→server message types are defined.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.registry.unsubscribe(id).await;
    info!("WebSocket client disconnected");
}

async fn send_message(socket: &mut WebSocket, message: &WsMessage) -> Result<(), ()> {
    let text = match serde_json::to_string(message) {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to serialize ws message: {e}");
            return Ok(());
        }
    };
    socket.send(Message::Text(text)).await.map_err(|e| {
        debug!("WebSocket send failed: {e}");
    })
}
