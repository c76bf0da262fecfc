//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::{ClientEvent, ErrorCode},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// Every event on the channel is already personalized for this connection
/// (translated history, translated messages, errors).
///
/// # Arguments
///
/// * `rx` - Channel receiver for events addressed to this connection
/// * `sender` - WebSocket sink to send events to this connection
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the event to this connection
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Connection identity is server-assigned; clients never pick their own
    let connection_id = ConnectionIdFactory::generate();
    tracing::info!("Connection '{}' opened", connection_id.as_str());

    // Create a channel for events addressed to this connection
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_connection(connection_id.clone(), tx)
        .await;

    let (sender, mut receiver) = socket.split();

    // Spawn a task to forward channel events to this connection
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text: {}", text);
                    handle_client_event(&state_clone, &connection_id_clone, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        connection_id_clone.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove the connection from the registry and drop its delivery channel
    match state.leave_chat_usecase.execute(&connection_id).await {
        Some(participant) => {
            tracing::info!(
                "Connection '{}' ({}) left chat '{}'",
                connection_id.as_str(),
                participant.display_name.as_str(),
                participant.chat_id.as_str()
            );
        }
        None => {
            tracing::info!(
                "Connection '{}' closed before joining a chat",
                connection_id.as_str()
            );
        }
    }
}

/// Dispatch a single client event to the matching use case
///
/// Use case failures are already reported to the client as error events
/// (or deliberately ignored); here they only need a log line.
async fn handle_client_event(state: &Arc<AppState>, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Failed to parse client event: {}", e);
            state
                .room_manager
                .deliver_error(
                    connection_id,
                    ErrorCode::InvalidPayload,
                    "malformed event payload",
                )
                .await;
            return;
        }
    };

    match event {
        ClientEvent::JoinChat {
            chat_id,
            preferred_language,
            sender_name,
        } => {
            if let Err(e) = state
                .join_chat_usecase
                .execute(
                    connection_id.clone(),
                    chat_id,
                    preferred_language,
                    sender_name,
                )
                .await
            {
                tracing::warn!("joinChat failed for '{}': {}", connection_id.as_str(), e);
            }
        }
        ClientEvent::SendMessage {
            text,
            chat_id,
            sender_name,
        } => {
            if let Err(e) = state
                .send_message_usecase
                .execute(connection_id.clone(), chat_id, text, sender_name)
                .await
            {
                tracing::warn!("sendMessage failed for '{}': {}", connection_id.as_str(), e);
            }
        }
    }
}
