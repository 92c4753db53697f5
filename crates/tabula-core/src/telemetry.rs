//! Tracing bootstrap.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a
//! console fmt layer (plain or JSON). There is no export pipeline; logs go
//! to the process output.

use crate::{TabulaError, TabulaResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether to install a console output layer at all.
    #[serde(default = "default_console_output")]
    pub console_output: bool,

    /// Emit log lines as JSON instead of human-readable text.
    #[serde(default)]
    pub json_output: bool,

    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_console_output() -> bool {
    true
}

fn default_filter() -> String {
    "info,tabula=debug".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            console_output: default_console_output(),
            json_output: false,
            filter: default_filter(),
        }
    }
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Fails if a
/// global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> TabulaResult<()> {
    if !config.console_output {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json_output {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| TabulaError::internal(format!("failed to install subscriber: {e}")))?;

    tracing::debug!(json = config.json_output, "telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert!(config.console_output);
        assert!(!config.json_output);
        assert_eq!(config.filter, "info,tabula=debug");
    }

    #[test]
    fn test_disabled_console_is_a_no_op() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        assert!(init_telemetry(&config).is_ok());
    }
}
