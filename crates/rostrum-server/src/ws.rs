//! WebSocket streaming for real-time session updates.
//!
//! Every screen in the venue (public display, scoreboard, judge inputs)
//! holds one connection to `/api/v1/ws`. On connect the observer receives a
//! full-state snapshot, then each state mutation as it happens, in the
//! order it was applied. Delivery is best-effort: an observer that cannot
//! keep up is resynchronized from a fresh snapshot instead of stalling the
//! session.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use rostrum_engine::{SessionEvent, SessionStore};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

/// WebSocket handler for session updates.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(store): State<SessionStore>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, store))
}

/// Handle a single observer connection.
async fn handle_socket(mut socket: WebSocket, store: SessionStore) {
    info!("observer connected");

    let (snapshot, mut events) = store.subscribe().await;
    let initial = SessionEvent::InitialState { state: snapshot };
    if let Err(e) = send_event(&mut socket, &initial).await {
        warn!("failed to send initial state: {}", e);
        return;
    }

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if let Err(e) = send_event(&mut socket, &event).await {
                            warn!("failed to push event: {}", e);
                            break;
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        // Too far behind to replay: start over from a
                        // fresh snapshot.
                        warn!("observer lagged, missed {} events", missed);
                        let (snapshot, receiver) = store.subscribe().await;
                        events = receiver;
                        let initial = SessionEvent::InitialState { state: snapshot };
                        if send_event(&mut socket, &initial).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        info!("observer disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Text(text))) => {
                        // Observers only listen; nothing to dispatch.
                        debug!("ignoring client message: {}", text);
                    }
                    Some(Err(e)) => {
                        warn!("websocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Send a session event over the socket as JSON.
async fn send_event(socket: &mut WebSocket, event: &SessionEvent) -> Result<(), axum::Error> {
    let json = serde_json::to_string(event).map_err(|e| {
        axum::Error::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    socket.send(Message::Text(json)).await
}
