//! Logging and metrics initialization.

use emporium_config::ObservabilityConfig;
use emporium_core::{EmporiumError, EmporiumResult};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

fn default_directives(level: &str) -> String {
    let level = level.to_lowercase();
    format!("{level},emporium={level},tower_http={level},sqlx=warn")
}

/// Installs the Prometheus recorder when metrics are enabled.
pub fn init_metrics(config: &ObservabilityConfig) -> EmporiumResult<Option<PrometheusHandle>> {
    if !config.metrics_enabled {
        return Ok(None);
    }

    PrometheusBuilder::new()
        .install_recorder()
        .map(Some)
        .map_err(|e| EmporiumError::Configuration(format!("Failed to install metrics recorder: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_follow_configured_level() {
        assert_eq!(
            default_directives("DEBUG"),
            "debug,emporium=debug,tower_http=debug,sqlx=warn"
        );
    }

    #[test]
    fn test_metrics_disabled_installs_nothing() {
        let config = ObservabilityConfig {
            metrics_enabled: false,
            ..ObservabilityConfig::default()
        };
        assert!(init_metrics(&config).unwrap().is_none());
    }
}
