//! HTTP endpoint handlers for the relay server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/health` | Liveness check |
//! | `GET` | `/update?status=` | Device status report (ingress) |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use ecoescape_types::{HealthReport, StatusAck};

use crate::error::RelayError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing relay status and endpoint links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let subscribers = state.registry.len().await;
    let total_items = state.puzzle.total_items;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="utf-8">
    <title>EcoEscape</title>
    <style>
        body {{
            background: #10231f;
            color: #e8f5e9;
            font-family: 'Segoe UI', 'Helvetica Neue', sans-serif;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #8bc34a; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #173a33;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
        }}
        .metric .label {{ color: #a5d6a7; font-size: 0.85rem; }}
        .metric .value {{ color: #cddc39; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #4aaa99; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>EcoEscape</h1>
    <p>Relay status: <strong>RUNNING</strong></p>

    <div class="metric">
        <div class="label">Connected players</div>
        <div class="value">{subscribers}</div>
    </div>
    <div class="metric">
        <div class="label">Items to sort</div>
        <div class="value">{total_items}</div>
    </div>

    <h2>Endpoints</h2>
    <ul>
        <li><a href="/health">GET /health</a> -- liveness check</li>
        <li><code>GET /update?status=ok</code> -- solar panel report</li>
        <li><code>ws://host:port/socket</code> -- push channel</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report that the relay is serving.
pub async fn health() -> Json<HealthReport> {
    tracing::debug!("health check");
    Json(HealthReport {
        status: String::from("ok"),
        timestamp: Utc::now(),
    })
}

// ---------------------------------------------------------------------------
// GET /update -- device ingress
// ---------------------------------------------------------------------------

/// Accept a status report from the sensor board.
///
/// Query parameters are taken as raw pairs so that repeated or unknown
/// keys never turn into a rejection. The first `status` value wins.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<StatusAck> {
    let status = params
        .iter()
        .find(|(key, _)| key == "status")
        .map(|(_, value)| value.as_str());
    Json(state.ingress.report_status(status).await)
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Answer unknown paths with a JSON 404.
pub async fn not_found(uri: Uri) -> RelayError {
    RelayError::NotFound(uri.path().to_owned())
}
