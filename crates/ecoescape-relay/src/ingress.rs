//! Ingress relay: turns device status reports into channel broadcasts.
//!
//! The solar panel's sensor board calls `GET /update?status=...`. The
//! relay never rejects a report: whatever arrives is echoed back in a
//! [`StatusAck`]. Only the exact string `"ok"` fans out an
//! [`EnergySignal`] to every connected subscriber. Delivery is
//! fire-and-forget; nothing is confirmed or retried.

use std::sync::Arc;

use chrono::Utc;
use ecoescape_types::{ENERGY_READY_STATUS, EnergySignal, StatusAck};
use tracing::info;

use crate::registry::{BroadcastReport, ConnectionRegistry};

/// Normalize a raw status parameter. A missing value becomes `""`;
/// anything else is kept verbatim, case included.
pub fn normalize_status(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_owned()
}

/// Accepts device reports and fans recognized ones out to subscribers.
#[derive(Debug, Clone)]
pub struct IngressRelay {
    registry: Arc<ConnectionRegistry>,
}

impl IngressRelay {
    /// Create a relay that broadcasts through `registry`.
    pub const fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Handle one device report.
    ///
    /// Always returns an acknowledgement. Broadcasts
    /// [`EnergySignal::ready`] when the normalized status is exactly
    /// `"ok"`.
    pub async fn report_status(&self, raw: Option<&str>) -> StatusAck {
        let status = normalize_status(raw);
        info!(status = %status, "device status report received");

        if status == ENERGY_READY_STATUS {
            let report = self.broadcast_ready().await;
            info!(
                delivered = report.delivered,
                dropped = report.dropped,
                pruned = report.pruned,
                "solar energy ready, broadcast to subscribers"
            );
        }

        StatusAck {
            received: true,
            status,
            timestamp: Utc::now(),
        }
    }

    async fn broadcast_ready(&self) -> BroadcastReport {
        self.registry.broadcast(&EnergySignal::ready()).await
    }
}
