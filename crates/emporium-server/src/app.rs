//! Application lifecycle.

use crate::{di::ServiceContainer, startup, telemetry};
use axum::Router;
use emporium_config::AppConfig;
use emporium_core::{EmporiumError, EmporiumResult, HealthCheck};
use emporium_repository::{create_pool, DatabasePool, DatabasePoolInterface};
use emporium_rest::{
    controllers::HealthState, create_router, middleware::ContextMiddlewareState, RouterOptions,
};
use emporium_service::create_cache;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// A built, not yet listening, server.
pub struct Application {
    config: AppConfig,
    router: Router,
    pool: Arc<DatabasePool>,
}

impl Application {
    /// Connects to backing services and wires the router.
    pub async fn build(config: AppConfig) -> EmporiumResult<Self> {
        let pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        let cache = create_cache(&config.cache)?;
        let metrics = telemetry::init_metrics(&config.observability)?;

        let container = ServiceContainer::build(&config, pool.clone(), cache);
        let health_checks = vec![pool.clone() as Arc<dyn HealthCheck>];

        let options = RouterOptions {
            server: config.server.clone(),
            context: ContextMiddlewareState::new(
                container.token_provider.clone(),
                config.i18n.default_locale,
            ),
            health: HealthState::new(health_checks),
            metrics,
            metrics_path: config.observability.metrics_path.clone(),
        };
        let router = create_router(container.state, options);

        Ok(Self {
            config,
            router,
            pool,
        })
    }

    /// Serves until a shutdown signal arrives, then closes the pool.
    pub async fn run(self) -> EmporiumResult<()> {
        let addr = self.config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| EmporiumError::Configuration(format!("Failed to bind {}: {}", addr, e)))?;

        startup::print_startup_info(&self.config);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| EmporiumError::Other(e.into()))?;

        self.pool.close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
