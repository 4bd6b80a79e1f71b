//! Structured logging.
//!
//! `RUST_LOG` wins over the configured level. Production always logs JSON.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_subscriber::util::TryInitError;

use crate::config::{DeploymentMode, LogFormat, ObservabilityConfig};

/// Default filter directives for the configured level.
pub fn default_directives(level: &str) -> String {
    format!("grading_api={level},tower_http={level}")
}

/// Whether events should be emitted as JSON lines.
pub fn use_json(config: &ObservabilityConfig, mode: DeploymentMode) -> bool {
    mode.is_production() || config.log_format == LogFormat::Json
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &ObservabilityConfig, mode: DeploymentMode) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if use_json(config, mode) {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_selection() {
        let mut config = ObservabilityConfig::default();
        assert!(!use_json(&config, DeploymentMode::Development));
        assert!(use_json(&config, DeploymentMode::Production));

        config.log_format = LogFormat::Json;
        assert!(use_json(&config, DeploymentMode::Development));
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives("debug"), "grading_api=debug,tower_http=debug");
    }
}
