//! `WebSocket` transport for game clients.
//!
//! Clients connect to `GET /ws`. Each connection becomes one session of
//! the game actor: the handler registers an outbox, forwards every
//! well-formed text frame as a [`ClientMessage`], and writes whatever the
//! actor queues in the outbox back to the socket as JSON text frames.
//!
//! Malformed frames (bad JSON, unknown `type`, binary) are dropped and the
//! connection stays open. When either side goes away the actor is told
//! the session disconnected. If the actor drops the outbox first (idle
//! eviction), the socket is closed.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use wildhold_types::{ClientMessage, ServerMessage, SessionId};

use crate::state::AppState;

/// Upgrade an HTTP request to a game `WebSocket`.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_game(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Parse one text frame. `None` for anything that is not a known message.
pub fn parse_frame(text: &str) -> Option<ClientMessage> {
    match serde_json::from_str(text) {
        Ok(message) => Some(message),
        Err(e) => {
            debug!(error = %e, "Malformed client message dropped");
            None
        }
    }
}

/// Serialize one outbound message.
pub fn encode_frame(message: &ServerMessage) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(error = %e, "Failed to serialize server message");
            None
        }
    }
}

async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    let session = state.game.next_session();
    let (outbox, inbox) = mpsc::unbounded_channel();
    if state.game.connect(session, outbox).is_err() {
        warn!(session = %session, "Game actor unavailable, dropping connection");
        return;
    }
    debug!(session = %session, "WebSocket client connected");

    pump(socket, inbox, &state, session).await;

    if state.game.disconnect(session).is_err() {
        debug!(session = %session, "Game actor gone before disconnect");
    }
    debug!(session = %session, "WebSocket client disconnected");
}

/// Shuttle frames both ways until either side closes.
async fn pump(
    mut socket: WebSocket,
    mut inbox: mpsc::UnboundedReceiver<ServerMessage>,
    state: &AppState,
    session: SessionId,
) {
    loop {
        tokio::select! {
            outbound = inbox.recv() => {
                let Some(message) = outbound else {
                    debug!(session = %session, "Session closed by the game");
                    if let Err(e) = socket.send(Message::Close(None)).await {
                        debug!(session = %session, error = %e, "Close frame not sent");
                    }
                    return;
                };
                let Some(json) = encode_frame(&message) else {
                    continue;
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    debug!(session = %session, "Send failed");
                    return;
                }
            }
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(message) = parse_frame(text.as_str()) {
                            if state.game.send(session, message).is_err() {
                                return;
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            return;
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        debug!(session = %session, "Binary frame dropped");
                    }
                    Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | None => return,
                    Some(Err(e)) => {
                        debug!(session = %session, error = %e, "WebSocket error");
                        return;
                    }
                }
            }
        }
    }
}
