//! Relay binary for the EcoEscape game.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `ecoescape-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build shared state (subscriber registry, ingress relay)
//! 4. Serve HTTP + `WebSocket` until Ctrl-C

mod error;

use std::path::Path;
use std::sync::Arc;

use ecoescape_core::EscapeConfig;
use ecoescape_core::config::{LogFormat, LoggingConfig};
use ecoescape_relay::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Name of the configuration file looked up in the working directory.
const CONFIG_FILE: &str = "ecoescape-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server cannot
/// bind or serve.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration.
    let config = load_config(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        host = config.server.host,
        port = config.server.port,
        total_items = config.puzzle.total_items,
        subscriber_buffer = config.channel.subscriber_buffer,
        "ecoescape-server starting"
    );

    // 3. Build shared state.
    let state = Arc::new(AppState::from_config(&config));

    // 4. Serve until Ctrl-C.
    ecoescape_relay::start_server(&config.server, state, shutdown_signal()).await?;

    info!("ecoescape-server shutdown complete");
    Ok(())
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist. `lookup` resolves the `HOST`/`PORT` overrides.
fn load_config(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<EscapeConfig, AppError> {
    if path.exists() {
        Ok(EscapeConfig::from_file_with(path, lookup)?)
    } else {
        // Overrides and validation still apply to defaults.
        Ok(EscapeConfig::parse_with("", lookup)?)
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(logging: &LoggingConfig) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| AppError::Logging {
            message: format!("invalid log level {:?}: {e}", logging.level),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MISSING: &str = "does-not-exist/ecoescape-config.yaml";

    #[test]
    fn missing_config_file_yields_valid_defaults() {
        let config = load_config(Path::new(MISSING), |_| None).unwrap();
        assert_eq!(config, EscapeConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_config_file_still_applies_overrides() {
        let config = load_config(Path::new(MISSING), |key| match key {
            "HOST" => Some(String::from("127.0.0.1")),
            "PORT" => Some(String::from("4100")),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4100);
    }

    #[test]
    fn bad_port_override_fails_startup() {
        let result = load_config(Path::new(MISSING), |key| {
            (key == "PORT").then(|| String::from("not-a-port"))
        });
        assert!(matches!(result, Err(AppError::Config { .. })));
    }

    #[test]
    fn unreadable_config_path_is_an_error() {
        // A directory exists but cannot be read as a file.
        let result = load_config(Path::new("."), |_| None);
        assert!(matches!(result, Err(AppError::Config { .. })));
    }
}
