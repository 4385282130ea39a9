//! Configuration loading and typed config structures for EcoEscape.
//!
//! The configuration lives in `ecoescape-config.yaml` next to the binary's
//! working directory. Every field has a default, so an empty or missing
//! file yields a runnable relay on `0.0.0.0:3000`.

use std::path::Path;

use serde::Deserialize;

/// Environment variable overriding `server.host`.
pub const HOST_ENV: &str = "HOST";

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PORT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `ecoescape-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EscapeConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Puzzle sizing.
    #[serde(default)]
    pub puzzle: PuzzleConfig,

    /// Notification channel limits.
    #[serde(default)]
    pub channel: ChannelConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EscapeConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `HOST` and `PORT` in the environment override the file's
    /// `server` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_file_with(path, |key| std::env::var(key).ok())
    }

    /// [`from_file`](Self::from_file), resolving overrides through `lookup`
    /// instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file).
    pub fn from_file_with(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_with(&contents, lookup)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_with(yaml, |key| std::env::var(key).ok())
    }

    /// Parse configuration from a YAML string, resolving `HOST` and `PORT`
    /// overrides through `lookup`, then validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value or override is out of range.
    pub fn parse_with(
        yaml: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.puzzle.total_items == 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("puzzle.total_items must be at least 1"),
            });
        }
        if self.channel.subscriber_buffer == 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("channel.subscriber_buffer must be at least 1"),
            });
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    /// Override values from `HOST` and `PORT` in the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PORT` is not a valid port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override values using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the port value is not a valid
    /// port number.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup(HOST_ENV) {
            self.host = host;
        }
        if let Some(raw) = lookup(PORT_ENV) {
            self.port = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                reason: format!("{PORT_ENV}={raw:?} is not a port number: {e}"),
            })?;
        }
        Ok(())
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Puzzle sizing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PuzzleConfig {
    /// Correct sorts needed to finish stage 1.
    #[serde(default = "default_total_items")]
    pub total_items: u32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            total_items: default_total_items(),
        }
    }
}

/// Notification channel limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelConfig {
    /// Events queued per subscriber before further events to that
    /// subscriber are dropped.
    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            subscriber_buffer: default_subscriber_buffer(),
        }
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3000
}

const fn default_total_items() -> u32 {
    5
}

const fn default_subscriber_buffer() -> usize {
    16
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EscapeConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.puzzle.total_items, 5);
        assert_eq!(config.channel.subscriber_buffer, 16);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8088
puzzle:
  total_items: 3
channel:
  subscriber_buffer: 4
logging:
  level: "debug"
  format: json
"#;
        let config: EscapeConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.puzzle.total_items, 3);
        assert_eq!(config.channel.subscriber_buffer, 4);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: EscapeConfig = serde_yml::from_str("puzzle:\n  total_items: 7\n").unwrap();
        assert_eq!(config.puzzle.total_items, 7);
        assert_eq!(config.server, ServerSettings::default());
        assert_eq!(config.channel, ChannelConfig::default());
    }

    #[test]
    fn zero_items_fails_validation() {
        let config: EscapeConfig = serde_yml::from_str("puzzle:\n  total_items: 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn zero_buffer_fails_validation() {
        let config: EscapeConfig =
            serde_yml::from_str("channel:\n  subscriber_buffer: 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_overrides_host_and_port() {
        let mut server = ServerSettings::default();
        server
            .apply_overrides(|key| match key {
                HOST_ENV => Some(String::from("10.0.0.2")),
                PORT_ENV => Some(String::from("4000")),
                _ => None,
            })
            .unwrap();
        assert_eq!(server.host, "10.0.0.2");
        assert_eq!(server.port, 4000);
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut server = ServerSettings::default();
        let result = server.apply_overrides(|key| (key == PORT_ENV).then(|| String::from("http")));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
        assert_eq!(server.port, 3000);
    }

    #[test]
    fn parse_with_empty_lookup_keeps_file_values() {
        let config =
            EscapeConfig::parse_with("server:\n  port: 8088\n", |_| None).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn parse_with_empty_input_yields_defaults() {
        let config = EscapeConfig::parse_with("", |_| None).unwrap();
        assert_eq!(config, EscapeConfig::default());
    }

    #[test]
    fn parse_with_applies_lookup_before_validation() {
        let config = EscapeConfig::parse_with("server:\n  port: 8088\n", |key| {
            (key == PORT_ENV).then(|| String::from("9090"))
        })
        .unwrap();
        assert_eq!(config.server.port, 9090);

        let result = EscapeConfig::parse_with("", |key| {
            (key == PORT_ENV).then(|| String::from("99999"))
        });
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let result: Result<EscapeConfig, _> = serde_yml::from_str("server: [1, 2");
        assert!(result.is_err());
    }
}
