use super::state::AppState;
use crate::relay::{ConnectionHandle, Inbound, ServerMessage, StreamingRelay};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::HeaderMap,
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, warn};

/// Request header carrying a client-chosen session id
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// GET /ws
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let session_id = headers
        .get(SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let relay = state.relay.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, relay, session_id))
}

async fn handle_socket(socket: WebSocket, relay: StreamingRelay, session_id: Option<String>) {
    let (ws_sender, mut ws_receiver) = socket.split();
    let (connection, rx) = ConnectionHandle::channel();

    let writer = tokio::spawn(forward_messages(ws_sender, rx));
    let handle = relay.on_connect(session_id, connection).await;

    while let Some(frame) = ws_receiver.next().await {
        let inbound = match frame {
            Ok(Message::Binary(data)) => Inbound::Binary(data),
            Ok(Message::Text(text)) => Inbound::Text(text),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                warn!("Session {}: websocket error: {}", handle.id(), e);
                break;
            }
        };

        if let Err(e) = relay.on_message(&handle, inbound).await {
            handle.report(&e);
        }
    }

    relay.on_close(&handle).await;
    writer.abort();
}

/// Forward queued server messages to the socket as JSON text frames
async fn forward_messages(
    mut sender: futures::stream::SplitSink<WebSocket, Message>,
    mut rx: UnboundedReceiver<ServerMessage>,
) {
    while let Some(message) = rx.recv().await {
        let payload = match serde_json::to_string(&message) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize {} message: {}", message.kind(), e);
                continue;
            }
        };

        if sender.send(Message::Text(payload)).await.is_err() {
            debug!("Websocket writer stopped, peer gone");
            break;
        }
    }
}
