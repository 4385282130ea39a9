//! Shared type definitions for the EcoEscape game.
//!
//! This crate is the single source of truth for every type that crosses a
//! crate or wire boundary. Types flow downstream to `TypeScript` via
//! `ts-rs` for the browser page.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for subscribers
//! - [`enums`] -- Waste categories, puzzle stages, sort outcomes
//! - [`structs`] -- Board entities and HTTP reply bodies
//! - [`messages`] -- Channel frames and state machine signals

pub mod enums;
pub mod ids;
pub mod messages;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{SortOutcome, Stage, WasteCategory};
pub use ids::SubscriberId;
pub use messages::{
    ClientMessage, ENERGY_EVENT, ENERGY_READY_STATUS, EnergySignal, PuzzleSignal, ServerMessage,
};
pub use structs::{Bin, HealthReport, PuzzleSnapshot, SortableItem, StatusAck};
