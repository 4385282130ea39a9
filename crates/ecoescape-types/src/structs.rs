//! Core entity structs for the puzzle board and the relay's HTTP replies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Stage, WasteCategory};

// ---------------------------------------------------------------------------
// Board entities
// ---------------------------------------------------------------------------

/// A waste item the player drags onto a bin.
///
/// The category is fixed at creation. Drag state is ephemeral, only
/// changes through [`pick_up`](Self::pick_up) and
/// [`release`](Self::release), and has no bearing on scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SortableItem {
    /// The category this item belongs to.
    category: WasteCategory,
    /// Whether the item is being dragged right now.
    currently_held: bool,
}

impl SortableItem {
    /// Create a new item of the given category, not held.
    pub const fn new(category: WasteCategory) -> Self {
        Self {
            category,
            currently_held: false,
        }
    }

    /// The item's waste category.
    pub const fn category(&self) -> WasteCategory {
        self.category
    }

    /// Whether the item is being dragged right now.
    pub const fn is_held(&self) -> bool {
        self.currently_held
    }

    /// Start dragging the item.
    pub const fn pick_up(&mut self) {
        self.currently_held = true;
    }

    /// Drop the item, wherever it lands.
    pub const fn release(&mut self) {
        self.currently_held = false;
    }
}

/// A drop target that accepts a single waste category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Bin {
    /// The only category this bin takes.
    pub accepted_category: WasteCategory,
}

impl Bin {
    /// Create a bin for the given category.
    pub const fn new(accepted_category: WasteCategory) -> Self {
        Self { accepted_category }
    }

    /// Whether `item` belongs in this bin.
    pub fn accepts(&self, item: &SortableItem) -> bool {
        self.accepted_category == item.category()
    }
}

/// Read-only view of a puzzle session, used for debug display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PuzzleSnapshot {
    /// Current stage.
    pub stage: Stage,
    /// Correct sorts so far.
    pub correct_sort_count: u32,
    /// Sorts needed to leave stage 1.
    pub total_items: u32,
}

// ---------------------------------------------------------------------------
// HTTP replies
// ---------------------------------------------------------------------------

/// Acknowledgement returned by `GET /update`.
///
/// Always sent, whatever the status string was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StatusAck {
    /// Always `true`: the relay never rejects a device report.
    pub received: bool,
    /// The normalized status string, echoed back.
    pub status: String,
    /// When the relay handled the report.
    pub timestamp: DateTime<Utc>,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthReport {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// When the check was answered.
    pub timestamp: DateTime<Utc>,
}
