//! `WebSocket` handler for the push channel.
//!
//! Clients connect to `GET /socket`. Each connection registers a
//! subscriber, gets a fresh puzzle session, and then pumps two sources
//! until either side goes away:
//!
//! - relayed [`EnergySignal`](ecoescape_types::EnergySignal)s from the registry
//! - JSON text frames from the client (sort submissions, snapshot requests)
//!
//! The subscriber is removed from the registry on every exit path.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use ecoescape_core::{PuzzleSession, TracingObserver};
use ecoescape_types::ServerMessage;
use tracing::{debug, info, warn};

use crate::connection::PuzzleConnection;
use crate::error::RelayError;
use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` push channel.
///
/// # Route
///
/// `GET /socket`
pub async fn ws_socket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Run one connection from subscribe to unsubscribe.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut subscription = state.registry.subscribe().await;
    let id = subscription.id();
    info!(subscriber = %id, "client connected");

    let session = match PuzzleSession::from_config(&state.puzzle) {
        Ok(session) => session,
        Err(e) => {
            warn!(subscriber = %id, error = %e, "cannot start puzzle session");
            if let Err(e) = send_all(&mut socket, &[ServerMessage::Error(e.to_string())]).await {
                debug!(subscriber = %id, error = %e, "send failed");
            }
            state.registry.unsubscribe(id).await;
            return;
        }
    };
    let observer = Box::new(TracingObserver::new(id.to_string()));
    let mut connection = PuzzleConnection::new(id, session, observer);

    loop {
        tokio::select! {
            // Event fanned out by the ingress relay.
            signal = subscription.recv() => {
                let Some(signal) = signal else {
                    debug!(subscriber = %id, "subscription closed");
                    break;
                };
                let out = connection.handle_energy(&signal);
                if let Err(e) = send_all(&mut socket, &out).await {
                    debug!(subscriber = %id, error = %e, "send failed");
                    break;
                }
            }
            // Frame from the client.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Text(text))) => {
                        let out = connection.handle_client_text(text.as_str());
                        if let Err(e) = send_all(&mut socket, &out).await {
                            debug!(subscriber = %id, error = %e, "send failed");
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(subscriber = %id, "pong failed");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(subscriber = %id, error = %e, "WebSocket error");
                        break;
                    }
                    _ => {
                        // Binary and pong frames carry nothing for us.
                    }
                }
            }
        }
    }

    state.registry.unsubscribe(id).await;
    info!(subscriber = %id, stage = ?connection.session().stage(), "client disconnected");
}

/// Serialize and send each frame in order.
///
/// A frame that fails to serialize is logged and skipped; a socket send
/// failure aborts the batch.
async fn send_all(socket: &mut WebSocket, frames: &[ServerMessage]) -> Result<(), axum::Error> {
    for frame in frames {
        let json = match encode(frame) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize frame");
                continue;
            }
        };
        socket.send(Message::Text(json.into())).await?;
    }
    Ok(())
}

fn encode(frame: &ServerMessage) -> Result<String, RelayError> {
    Ok(serde_json::to_string(frame)?)
}
