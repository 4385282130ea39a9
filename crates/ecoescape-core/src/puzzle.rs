//! The per-client puzzle state machine.
//!
//! A [`PuzzleSession`] walks through three stages and never goes back:
//!
//! ```text
//! Sorting --(last correct sort)--> AwaitingEnergy --(energy "ok")--> Complete
//! ```
//!
//! Every input returns the [`PuzzleSignal`]s it produced. An input that is
//! not valid for the current stage returns no signals and leaves the
//! session untouched; network delivery can race local state, so stray
//! inputs are expected rather than faults.

use ecoescape_types::{
    Bin, EnergySignal, PuzzleSignal, PuzzleSnapshot, SortOutcome, SortableItem, Stage,
};
use tracing::debug;

use crate::config::PuzzleConfig;
use crate::observer::PuzzleObserver;

/// Errors that can occur when creating a puzzle session.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PuzzleError {
    /// A session needs at least one item to sort.
    #[error("a puzzle session needs at least one item to sort")]
    NoItems,
}

/// In-memory state of one player's puzzle.
///
/// Owned by whatever drives the player's UI (on the relay, one per
/// `WebSocket` connection). Not persisted: a reconnect starts over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSession {
    /// Current stage. Only moves forward.
    stage: Stage,

    /// Correct sorts so far. Never decreases, never exceeds `total_items`.
    correct_sort_count: u32,

    /// Correct sorts needed to leave [`Stage::Sorting`].
    total_items: u32,
}

impl PuzzleSession {
    /// Create a session in [`Stage::Sorting`] with no sorts made.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::NoItems`] if `total_items` is zero.
    pub const fn new(total_items: u32) -> Result<Self, PuzzleError> {
        if total_items == 0 {
            return Err(PuzzleError::NoItems);
        }
        Ok(Self {
            stage: Stage::Sorting,
            correct_sort_count: 0,
            total_items,
        })
    }

    /// Create a session sized from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::NoItems`] if the configured item count is zero.
    pub const fn from_config(config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        Self::new(config.total_items)
    }

    /// The current stage.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Number of correct sorts so far.
    pub const fn correct_sort_count(&self) -> u32 {
        self.correct_sort_count
    }

    /// Number of correct sorts required to finish stage 1.
    pub const fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Read-only view for debug display.
    pub const fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            stage: self.stage,
            correct_sort_count: self.correct_sort_count,
            total_items: self.total_items,
        }
    }

    /// Judge an item dropped on a bin.
    ///
    /// Only acts in [`Stage::Sorting`]. A match bumps the score and emits
    /// [`SortOutcome::Correct`]; the sort that reaches `total_items` also
    /// emits [`PuzzleSignal::StageAdvanced`] to [`Stage::AwaitingEnergy`].
    /// A mismatch emits [`SortOutcome::Incorrect`] and changes nothing.
    pub fn submit_sort(&mut self, item: &SortableItem, bin: &Bin) -> Vec<PuzzleSignal> {
        if self.stage != Stage::Sorting {
            debug!(stage = ?self.stage, "sort ignored outside the sorting stage");
            return Vec::new();
        }

        if !bin.accepts(item) {
            return vec![PuzzleSignal::Sorted(SortOutcome::Incorrect)];
        }

        // In Sorting the count is strictly below total_items, so this
        // never saturates.
        self.correct_sort_count = self.correct_sort_count.saturating_add(1);
        let mut signals = vec![PuzzleSignal::Sorted(SortOutcome::Correct)];

        if self.correct_sort_count >= self.total_items {
            self.stage = Stage::AwaitingEnergy;
            signals.push(PuzzleSignal::StageAdvanced(Stage::AwaitingEnergy));
        }

        signals
    }

    /// Handle an energy status pushed by the relay.
    ///
    /// Completes the puzzle only when the session is in
    /// [`Stage::AwaitingEnergy`] and the payload is the trigger value.
    /// Anything else is dropped without error.
    pub fn on_energy_signal(&mut self, signal: &EnergySignal) -> Vec<PuzzleSignal> {
        if self.stage != Stage::AwaitingEnergy {
            debug!(stage = ?self.stage, "energy signal ignored outside the awaiting stage");
            return Vec::new();
        }
        if !signal.is_ready() {
            debug!(status = %signal.status, "energy signal ignored, not a trigger value");
            return Vec::new();
        }

        self.stage = Stage::Complete;
        vec![
            PuzzleSignal::StageAdvanced(Stage::Complete),
            PuzzleSignal::PuzzleFinished,
        ]
    }

    /// [`submit_sort`](Self::submit_sort), then hand each signal to `observer`.
    pub fn submit_sort_observed(
        &mut self,
        item: &SortableItem,
        bin: &Bin,
        observer: &mut dyn PuzzleObserver,
    ) -> Vec<PuzzleSignal> {
        let signals = self.submit_sort(item, bin);
        self.notify(observer, &signals);
        signals
    }

    /// [`on_energy_signal`](Self::on_energy_signal), then hand each signal
    /// to `observer`.
    pub fn on_energy_signal_observed(
        &mut self,
        signal: &EnergySignal,
        observer: &mut dyn PuzzleObserver,
    ) -> Vec<PuzzleSignal> {
        let signals = self.on_energy_signal(signal);
        self.notify(observer, &signals);
        signals
    }

    fn notify(&self, observer: &mut dyn PuzzleObserver, signals: &[PuzzleSignal]) {
        let snapshot = self.snapshot();
        for signal in signals {
            observer.on_signal(*signal, &snapshot);
        }
    }
}
