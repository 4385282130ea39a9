//! Messages that flow over the notification channel and the puzzle's
//! signal bus.
//!
//! The `WebSocket` frames are JSON objects of the form
//! `{"event": <name>, "data": <payload>}`, matching the event-emitter
//! shape the browser page already speaks.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{SortOutcome, Stage, WasteCategory};
use crate::structs::PuzzleSnapshot;

/// Name of the channel event that carries the solar panel status.
pub const ENERGY_EVENT: &str = "energie";

/// The only energy status value that drives the puzzle forward.
pub const ENERGY_READY_STATUS: &str = "ok";

/// A status report fanned out to every subscriber.
///
/// Exists only as a message in flight; the relay keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EnergySignal {
    /// Status payload, delivered verbatim.
    pub status: String,
}

impl EnergySignal {
    /// Build the signal the relay sends when the panel reports `"ok"`.
    pub fn ready() -> Self {
        Self {
            status: String::from(ENERGY_READY_STATUS),
        }
    }

    /// Whether this payload is the recognized trigger value.
    pub fn is_ready(&self) -> bool {
        self.status == ENERGY_READY_STATUS
    }
}

/// Signal emitted by the puzzle state machine after an input.
///
/// These are the observable contract of the state machine. UI feedback
/// hangs off them and never touches session state directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PuzzleSignal {
    /// A sort attempt was judged.
    Sorted(SortOutcome),
    /// The session moved to a new stage.
    StageAdvanced(Stage),
    /// The session reached [`Stage::Complete`].
    PuzzleFinished,
}

/// Frame sent from the relay to a connected client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ServerMessage {
    /// Relayed energy status, payload verbatim.
    #[serde(rename = "energie")]
    Energy(String),
    /// Outcome of a sort submitted on this connection.
    Sorted(SortOutcome),
    /// This connection's session advanced.
    Stage(Stage),
    /// This connection's session completed.
    Finished,
    /// Current session state, on request.
    Snapshot(PuzzleSnapshot),
    /// A client frame could not be understood.
    Error(String),
}

impl From<PuzzleSignal> for ServerMessage {
    fn from(signal: PuzzleSignal) -> Self {
        match signal {
            PuzzleSignal::Sorted(outcome) => Self::Sorted(outcome),
            PuzzleSignal::StageAdvanced(stage) => Self::Stage(stage),
            PuzzleSignal::PuzzleFinished => Self::Finished,
        }
    }
}

impl From<EnergySignal> for ServerMessage {
    fn from(signal: EnergySignal) -> Self {
        Self::Energy(signal.status)
    }
}

/// Frame sent from a client to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ClientMessage {
    /// An item was dropped on a bin.
    Sort {
        /// Category of the dropped item.
        item: WasteCategory,
        /// Category the target bin accepts.
        bin: WasteCategory,
    },
    /// Ask for the session's current state.
    Snapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_frame_uses_event_name() {
        let msg = ServerMessage::from(EnergySignal::ready());
        let json = serde_json::to_value(&msg).unwrap_or_default();
        assert_eq!(json["event"], ENERGY_EVENT);
        assert_eq!(json["data"], "ok");
    }

    #[test]
    fn finished_frame_has_no_data() {
        let json = serde_json::to_string(&ServerMessage::Finished).unwrap_or_default();
        assert_eq!(json, r#"{"event":"finished"}"#);
    }

    #[test]
    fn sort_frame_parses() {
        let raw = r#"{"event":"sort","data":{"item":"plastic","bin":"glass"}}"#;
        let msg: Result<ClientMessage, _> = serde_json::from_str(raw);
        assert_eq!(
            msg.ok(),
            Some(ClientMessage::Sort {
                item: WasteCategory::Plastic,
                bin: WasteCategory::Glass,
            })
        );
    }

    #[test]
    fn only_exact_ok_is_ready() {
        assert!(EnergySignal::ready().is_ready());
        let upper = EnergySignal {
            status: String::from("OK"),
        };
        assert!(!upper.is_ready());
    }
}
