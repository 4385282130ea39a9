//! Per-connection driver tying one subscriber to one puzzle session.
//!
//! Each `WebSocket` connection gets a fresh [`PuzzleSession`]. The driver
//! turns client frames and relayed energy events into session inputs and
//! returns the frames to send back. It does no I/O itself, so the socket
//! loop in [`crate::ws`] stays a thin pump.

use ecoescape_core::{PuzzleObserver, PuzzleSession};
use ecoescape_types::{
    Bin, ClientMessage, EnergySignal, ServerMessage, SortableItem, SubscriberId,
};
use tracing::debug;

/// One connected client's puzzle state plus its feedback observer.
pub struct PuzzleConnection {
    id: SubscriberId,
    session: PuzzleSession,
    observer: Box<dyn PuzzleObserver>,
}

impl PuzzleConnection {
    /// Wrap a fresh session for subscriber `id`.
    pub fn new(id: SubscriberId, session: PuzzleSession, observer: Box<dyn PuzzleObserver>) -> Self {
        Self {
            id,
            session,
            observer,
        }
    }

    /// The subscriber this connection belongs to.
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// The connection's puzzle session.
    pub const fn session(&self) -> &PuzzleSession {
        &self.session
    }

    /// Handle a raw text frame from the client.
    ///
    /// Undecodable frames yield a single [`ServerMessage::Error`]; the
    /// connection stays open.
    pub fn handle_client_text(&mut self, text: &str) -> Vec<ServerMessage> {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(msg) => self.handle_client_message(msg),
            Err(e) => {
                debug!(subscriber = %self.id, error = %e, "undecodable client frame");
                vec![ServerMessage::Error(format!("invalid message: {e}"))]
            }
        }
    }

    /// Handle a decoded client frame.
    pub fn handle_client_message(&mut self, msg: ClientMessage) -> Vec<ServerMessage> {
        match msg {
            ClientMessage::Sort { item, bin } => {
                let item = SortableItem::new(item);
                let bin = Bin::new(bin);
                self.session
                    .submit_sort_observed(&item, &bin, self.observer.as_mut())
                    .into_iter()
                    .map(ServerMessage::from)
                    .collect()
            }
            ClientMessage::Snapshot => vec![ServerMessage::Snapshot(self.session.snapshot())],
        }
    }

    /// Handle an event relayed from the ingress.
    ///
    /// The event itself is always forwarded first, whatever the session's
    /// stage. Any resulting session signals follow it.
    pub fn handle_energy(&mut self, signal: &EnergySignal) -> Vec<ServerMessage> {
        let mut out = vec![ServerMessage::Energy(signal.status.clone())];
        out.extend(
            self.session
                .on_energy_signal_observed(signal, self.observer.as_mut())
                .into_iter()
                .map(ServerMessage::from),
        );
        out
    }
}
