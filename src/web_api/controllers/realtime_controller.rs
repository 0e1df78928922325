//! Live task events over a websocket.
//!
//! The server only pushes. Anything the client sends other than a close
//! frame is ignored.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    Extension,
};
use futures_util::{SinkExt, StreamExt};
use tracing::debug;

use crate::{app_state::SharedState, user::User};

pub struct RealtimeController {}

impl RealtimeController {
    pub async fn connect(
        ws: WebSocketUpgrade,
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
    ) -> impl IntoResponse {
        debug!(user_id = %user.id, "realtime upgrade requested");
        ws.on_upgrade(move |socket| handle_socket(socket, state))
    }
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (subscriber_id, mut events) = state.broadcaster.subscribe();

    // Ends when the broadcaster prunes us (channel closed) or the peer is gone.
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = events.recv().await {
            if ws_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_rx.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.broadcaster.disconnect(subscriber_id);
}
