use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use svgsmith_core::studio::StudioSnapshot;
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;
use crate::studio::StudioService;

/// HTTP handler that upgrades the connection to WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.studio))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Subscribes to studio snapshots and sends the current one.
///   2. Spawns a sender task that forwards every published snapshot.
///   3. Drains inbound messages on the current task until the client leaves.
async fn handle_socket(socket: WebSocket, studio: Arc<StudioService>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    // Subscribe before reading the snapshot so no transition falls between.
    let mut rx = studio.subscribe();
    let (mut sink, mut stream) = socket.split();

    let initial = studio.snapshot().await;
    if send_snapshot(&mut sink, &initial).await.is_err() {
        tracing::debug!(conn_id = %conn_id, "WebSocket closed before initial snapshot");
        return;
    }

    // Sender task: forward published snapshots to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(snapshot) => {
                    if send_snapshot(&mut sink, &snapshot).await.is_err() {
                        tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(conn_id = %sender_conn_id, skipped, "WebSocket subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Receiver loop: the stream is push-only, so inbound data is ignored.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

async fn send_snapshot(
    sink: &mut SplitSink<WebSocket, Message>,
    snapshot: &StudioSnapshot,
) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(snapshot) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize studio snapshot");
            return Ok(());
        }
    };
    sink.send(Message::Text(json.into())).await
}
