//! # Emporium Server
//!
//! Main entry point: loads configuration, initializes telemetry, and serves
//! the REST API until interrupted.

use emporium_config::ConfigLoader;
use emporium_core::EmporiumResult;
use emporium_server::{app::Application, startup, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    telemetry::init_logging(&config.observability);
    startup::print_banner();
    info!("Starting Emporium v{}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: emporium_config::AppConfig) -> EmporiumResult<()> {
    Application::build(config).await?.run().await
}
