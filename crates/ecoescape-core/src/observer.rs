//! Observer layer for puzzle signals.
//!
//! UI feedback (bin flashes, the score line, the solar panel reveal) is
//! kept out of the state machine. Anything that wants to react to a
//! signal implements [`PuzzleObserver`] and is handed each signal along
//! with the session state right after the input was applied.

use ecoescape_types::{PuzzleSignal, PuzzleSnapshot, SortOutcome, Stage};
use tracing::info;

/// Receiver of signals emitted by a [`PuzzleSession`](crate::PuzzleSession).
pub trait PuzzleObserver: Send {
    /// Called once per emitted signal, in emission order.
    fn on_signal(&mut self, signal: PuzzleSignal, snapshot: &PuzzleSnapshot);
}

/// An observer that does nothing.
pub struct NoOpObserver;

impl PuzzleObserver for NoOpObserver {
    fn on_signal(&mut self, _signal: PuzzleSignal, _snapshot: &PuzzleSnapshot) {}
}

/// Writes each signal to the `tracing` log.
#[derive(Debug, Default)]
pub struct TracingObserver {
    /// Label included with every line (usually the subscriber ID).
    label: String,
}

impl TracingObserver {
    /// Create an observer that tags its lines with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl PuzzleObserver for TracingObserver {
    fn on_signal(&mut self, signal: PuzzleSignal, snapshot: &PuzzleSnapshot) {
        let label = self.label.as_str();
        let score = snapshot.correct_sort_count;
        let total = snapshot.total_items;
        match signal {
            PuzzleSignal::Sorted(SortOutcome::Correct) => {
                info!(session = label, score, total, "correct sort");
            }
            PuzzleSignal::Sorted(SortOutcome::Incorrect) => {
                info!(session = label, score, total, "incorrect sort");
            }
            PuzzleSignal::StageAdvanced(Stage::AwaitingEnergy) => {
                info!(session = label, "sorting solved, waiting for solar energy");
            }
            PuzzleSignal::StageAdvanced(stage) => {
                info!(session = label, ?stage, "stage advanced");
            }
            PuzzleSignal::PuzzleFinished => {
                info!(session = label, "solar panel repaired, puzzle complete");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ecoescape_types::{Bin, EnergySignal, SortableItem, WasteCategory};

    use super::*;
    use crate::PuzzleSession;

    /// Records every signal it sees.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(PuzzleSignal, Stage)>,
    }

    impl PuzzleObserver for Recorder {
        fn on_signal(&mut self, signal: PuzzleSignal, snapshot: &PuzzleSnapshot) {
            self.seen.push((signal, snapshot.stage));
        }
    }

    #[test]
    fn observer_sees_signals_in_order_with_post_state() {
        let mut session = PuzzleSession::new(1).unwrap();
        let mut recorder = Recorder::default();
        let item = SortableItem::new(WasteCategory::Organic);

        session.submit_sort_observed(&item, &Bin::new(WasteCategory::Metal), &mut recorder);
        session.submit_sort_observed(&item, &Bin::new(WasteCategory::Organic), &mut recorder);
        session.on_energy_signal_observed(&EnergySignal::ready(), &mut recorder);

        assert_eq!(
            recorder.seen,
            vec![
                (PuzzleSignal::Sorted(SortOutcome::Incorrect), Stage::Sorting),
                (PuzzleSignal::Sorted(SortOutcome::Correct), Stage::AwaitingEnergy),
                (
                    PuzzleSignal::StageAdvanced(Stage::AwaitingEnergy),
                    Stage::AwaitingEnergy
                ),
                (PuzzleSignal::StageAdvanced(Stage::Complete), Stage::Complete),
                (PuzzleSignal::PuzzleFinished, Stage::Complete),
            ]
        );
    }

    #[test]
    fn ignored_input_notifies_nobody() {
        let mut session = PuzzleSession::new(2).unwrap();
        let mut recorder = Recorder::default();
        session.on_energy_signal_observed(&EnergySignal::ready(), &mut recorder);
        assert!(recorder.seen.is_empty());
    }

    #[test]
    fn tracing_and_noop_observers_accept_every_signal() {
        let snapshot = PuzzleSession::new(1).unwrap().snapshot();
        let mut tracing_observer = TracingObserver::new("test");
        let mut noop = NoOpObserver;
        for signal in [
            PuzzleSignal::Sorted(SortOutcome::Correct),
            PuzzleSignal::Sorted(SortOutcome::Incorrect),
            PuzzleSignal::StageAdvanced(Stage::AwaitingEnergy),
            PuzzleSignal::StageAdvanced(Stage::Complete),
            PuzzleSignal::PuzzleFinished,
        ] {
            tracing_observer.on_signal(signal, &snapshot);
            noop.on_signal(signal, &snapshot);
        }
    }
}
