use std::sync::Arc;
use axum::{
    extract::{Extension, State, ws::{Message, WebSocket, WebSocketUpgrade}},
    http::StatusCode,
    response::Response,
    Json,
};
use tokio::sync::{broadcast::{self, error::RecvError}, Mutex};
use tracing::{info, warn, error, debug};
use futures_util::{StreamExt, SinkExt};

use crate::AppState;
use crate::auth::auth;
use crate::models::{ErrorResponse, SendMessage, StudentMessage, TeacherMessage};
use crate::relay::BroadcastRelay;
use crate::services::auth_service::Identity;
use crate::utils::scope_guard::ScopeGuard;
use crate::websocket::msg_code_handler::handle_code_message;
use crate::websocket::msg_ping_handler::handle_ping_message;
use crate::websocket::msg_select_handler::handle_select_message;

/// General channel: one socket per student
pub async fn student_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    auth::ensure_student(&identity)?;
    info!("New student WebSocket connection attempt from {}", identity.id);
    Ok(ws.on_upgrade(move |socket| handle_student_socket(socket, identity, state.relay)))
}

/// Teacher channel: receives the selected student's code, sends selections
pub async fn teacher_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    auth::ensure_teacher(&identity)?;
    info!("New teacher WebSocket connection attempt from {}", identity.id);
    Ok(ws.on_upgrade(move |socket| handle_teacher_socket(socket, identity, state.relay)))
}

async fn handle_student_socket(socket: WebSocket, identity: Identity, relay: Arc<BroadcastRelay>) {

    let connection_id = relay.student_connected(&identity.id, identity.profile.clone()).await;

    // Removal runs however this task ends, including abort
    let _cleanup = {
        let relay = relay.clone();
        let id = identity.id.clone();
        ScopeGuard::new(move || {
            tokio::spawn(async move {
                relay.student_disconnected(&id, connection_id).await;
            });
        })
    };

    let (sender, mut receiver) = socket.split();
    let sender = Arc::new(Mutex::new(sender));

    while let Some(frame) = receiver.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(Message::Binary(_)) => {
                warn!("Ignoring binary frame from student {}", identity.id);
                continue;
            }
            Ok(_) => continue,
            Err(e) => {
                warn!("WebSocket error for student {}: {}", identity.id, e);
                break;
            }
        };

        let msg: StudentMessage = match serde_json::from_str(&text) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("Failed to parse message from student {}: {}", identity.id, e);
                continue;
            }
        };

        match msg {
            StudentMessage::Code(code_msg) => {
                handle_code_message(code_msg, &identity, &relay).await;
            }
            StudentMessage::Ping(ping_msg) => {
                handle_ping_message(&ping_msg, &identity.id, &sender).await;
            }
        }
    }

    info!("Student WebSocket connection terminated for {}", identity.id);
}

async fn handle_teacher_socket(socket: WebSocket, identity: Identity, relay: Arc<BroadcastRelay>) {

    info!("Teacher {} connected", identity.id);
    let (sender, mut receiver) = socket.split();

    // Shared between the forwarding task and pong replies
    let sender1 = Arc::new(Mutex::new(sender));
    let sender2 = sender1.clone();

    let mut teacher_rx = relay.subscribe_teacher();
    let teacher_id = identity.id.clone();

    // Read selections and pings from the teacher
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            let text = match frame {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => break,
                Ok(Message::Binary(_)) => {
                    warn!("Ignoring binary frame from teacher {}", identity.id);
                    continue;
                }
                Ok(_) => continue,
                Err(e) => {
                    warn!("WebSocket error for teacher {}: {}", identity.id, e);
                    break;
                }
            };

            match serde_json::from_str::<TeacherMessage>(&text) {
                Ok(TeacherMessage::Select(select_msg)) => {
                    handle_select_message(select_msg, &relay).await;
                }
                Ok(TeacherMessage::Ping(ping_msg)) => {
                    handle_ping_message(&ping_msg, &identity.id, &sender1).await;
                }
                Err(e) => {
                    warn!("Failed to parse message from teacher {}: {}", identity.id, e);
                }
            }
        }
    });

    // Forward the teacher channel to this socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = next_teacher_message(&mut teacher_rx, &teacher_id).await {

            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize teacher message: {}", e);
                    continue;
                }
            };

            if sender2.lock().await.send(Message::Text(text)).await.is_err() {
                debug!("Teacher {} socket closed while forwarding", teacher_id);
                break;
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };
    info!("Teacher WebSocket connection terminated");
}

/// Next message for a teacher socket. A lagging receiver skips ahead to the
/// oldest message still buffered; `None` once the relay is gone.
async fn next_teacher_message(rx: &mut broadcast::Receiver<SendMessage>, teacher_id: &str) -> Option<SendMessage> {
    loop {
        match rx.recv().await {
            Ok(msg) => return Some(msg),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Teacher {} lagged behind, skipped {} messages", teacher_id, skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}
