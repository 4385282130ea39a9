//! Puzzle state machine and configuration for the EcoEscape game.
//!
//! This crate owns the two-stage puzzle: sorting waste into bins, then
//! waiting for the solar panel to report energy. It has no I/O of its
//! own; the relay feeds it inputs and forwards the signals it emits.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `ecoescape-config.yaml` into
//!   strongly-typed structs.
//! - [`observer`] -- [`PuzzleObserver`] trait for UI feedback and the
//!   [`TracingObserver`] log sink.
//! - [`puzzle`] -- [`PuzzleSession`], the per-client state machine.
//!
//! [`PuzzleObserver`]: observer::PuzzleObserver
//! [`TracingObserver`]: observer::TracingObserver
//! [`PuzzleSession`]: puzzle::PuzzleSession

pub mod config;
pub mod observer;
pub mod puzzle;

pub use config::{ConfigError, EscapeConfig};
pub use observer::{NoOpObserver, PuzzleObserver, TracingObserver};
pub use puzzle::{PuzzleError, PuzzleSession};
