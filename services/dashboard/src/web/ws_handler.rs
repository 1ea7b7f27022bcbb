//! services/dashboard/src/web/ws_handler.rs
//!
//! The entry point and control loop for an analyzer WebSocket connection.
//! Each connection owns one pipeline; closing the socket tears it down.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
    Extension,
};
use futures::{SinkExt, StreamExt};
use legalvision_core::domain::{FileHandle, UserSession};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::adapters::ClientChannel;
use crate::web::{
    actions,
    analyzer_task::PipelineRunner,
    protocol::{ClientMessage, ServerMessage},
    state::AppState,
};

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn analyzer_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<UserSession>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state, user))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>, user: UserSession) {
    info!("Analyzer connection opened for {}", user.email);

    let (mut sender, mut receiver) = socket.split();
    let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<ServerMessage>();

    // --- 1. Outbound Writer ---
    let writer = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            let json = match message.to_json() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize server message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                warn!("Failed to write to analyzer socket; closing writer.");
                break;
            }
        }
    });

    let client = ClientChannel::new(outbound.clone());
    let mut runner = PipelineRunner::new(app_state.timings, outbound.clone(), Arc::new(client.clone()));

    let _ = outbound.send(ServerMessage::Connected {
        snapshot: runner.snapshot().await,
    });

    // --- 2. Main Message Loop ---
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                handle_text_message(text.as_str(), &app_state, &client, &mut runner, &outbound).await;
            }
            Message::Close(_) => {
                info!("Client sent close message.");
                break;
            }
            _ => {}
        }
    }

    // --- 3. Cleanup ---
    runner.shutdown().await;
    drop(runner);
    drop(client);
    drop(outbound);
    if let Err(e) = writer.await {
        error!("Analyzer writer ended abnormally: {}", e);
    }
    info!("Analyzer connection closed for {}", user.email);
}

/// Dispatches one `ClientMessage`.
async fn handle_text_message(
    text: &str,
    app_state: &Arc<AppState>,
    client: &ClientChannel,
    runner: &mut PipelineRunner,
    outbound: &mpsc::UnboundedSender<ServerMessage>,
) {
    let client_msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Failed to deserialize client message: {}", e);
            let _ = outbound.send(ServerMessage::Error {
                message: format!("Unrecognized message: {}", e),
            });
            return;
        }
    };

    match client_msg {
        ClientMessage::SubmitFile {
            name,
            size,
            mime_type,
        } => {
            runner
                .submit_file(FileHandle::new(name, size, mime_type))
                .await;
        }
        ClientMessage::Reset => runner.reset().await,
        ClientMessage::CopyText { content } => {
            actions::copy_text(client, client, &content).await;
        }
        ClientMessage::CopySummary => {
            let result = runner.result().await;
            actions::copy_summary(client, client, result.as_ref()).await;
        }
        ClientMessage::Export { format } => {
            let result = runner.result().await;
            actions::export_result(app_state.exporter.as_ref(), client, result.as_ref(), format)
                .await;
        }
        ClientMessage::Snapshot => {
            let _ = outbound.send(ServerMessage::Snapshot {
                snapshot: runner.snapshot().await,
            });
        }
    }
}
