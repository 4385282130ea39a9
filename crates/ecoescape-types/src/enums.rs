//! Enumeration types for the EcoEscape puzzle.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Waste categories
// ---------------------------------------------------------------------------

/// A waste category. Each sortable item has exactly one, and each bin
/// accepts exactly one.
///
/// Serialized in `snake_case` to match the `data-type` attributes used by
/// the browser page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum WasteCategory {
    /// Plastic bottles and packaging.
    Plastic,
    /// Paper and cardboard.
    Paper,
    /// Glass jars and bottles.
    Glass,
    /// Food scraps and garden waste.
    Organic,
    /// Cans and other metal packaging.
    Metal,
}

impl WasteCategory {
    /// Every category, in board order.
    pub const ALL: [Self; 5] = [
        Self::Plastic,
        Self::Paper,
        Self::Glass,
        Self::Organic,
        Self::Metal,
    ];
}

// ---------------------------------------------------------------------------
// Puzzle stages
// ---------------------------------------------------------------------------

/// One phase of the two-phase puzzle.
///
/// Ordering follows the only legal progression, so `a < b` means `b`
/// can only be reached after `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Stage {
    /// Stage 1: the player drags waste items into bins.
    Sorting,
    /// Stage 2: the board waits for the solar panel to report energy.
    AwaitingEnergy,
    /// Terminal: both stages are done.
    Complete,
}

impl Stage {
    /// Whether no further transition can leave this stage.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Result of dropping an item into a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SortOutcome {
    /// The item's category matched the bin.
    Correct,
    /// Wrong bin; nothing changed.
    Incorrect,
}
