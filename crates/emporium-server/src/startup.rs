//! Server startup utilities.

use emporium_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ______                           _
   / ____/___ ___  ____  ____  _____(_)_  ______ ___
  / __/ / __ `__ \/ __ \/ __ \/ ___/ / / / / __ `__ \
 / /___/ / / / / / /_/ / /_/ / /  / / /_/ / / / / / /
/_____/_/ /_/ /_/ .___/\____/_/  /_/\__,_/_/ /_/ /_/
               /_/
    "#);
}

/// Prints where the server can be reached.
pub fn print_startup_info(config: &AppConfig) {
    let base = format!("http://{}", config.server.addr());
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  {}/api/v1", base);
    info!("Health:    {}/health", base);
    if config.server.swagger_enabled {
        info!("API Docs:  {}/swagger-ui", base);
    }
    if config.observability.metrics_enabled {
        info!("Metrics:   {}{}", base, config.observability.metrics_path);
    }
    info!("Cache:     {:?}", config.cache.backend);
    info!("{}", separator);
}
