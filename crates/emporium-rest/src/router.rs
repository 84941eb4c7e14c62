//! Main application router.

use crate::{
    controllers::{
        auth_controller, category_controller, company_controller, health_controller,
        product_controller, review_controller, user_controller, HealthState,
    },
    middleware::{logging_middleware, request_context_middleware, ContextMiddlewareState},
    openapi::ApiDoc,
    state::AppState,
};
use emporium_config::ServerConfig;
use axum::{http::HeaderValue, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Everything the router needs besides the services.
#[derive(Clone)]
pub struct RouterOptions {
    pub server: ServerConfig,
    pub context: ContextMiddlewareState,
    pub health: HealthState,
    /// Serves the Prometheus exposition at `metrics_path` when set.
    pub metrics: Option<PrometheusHandle>,
    pub metrics_path: String,
}

/// Creates the main application router.
pub fn create_router(state: AppState, options: RouterOptions) -> Router {
    let cors = create_cors_layer(&options.server);

    let api_router = Router::new()
        .nest("/auth", auth_controller::router())
        .nest("/users", user_controller::router())
        .nest("/categories", category_controller::router())
        .nest("/companies", company_controller::router())
        .nest("/products", product_controller::router())
        .nest("/reviews", review_controller::router())
        .layer(middleware::from_fn_with_state(
            options.context.clone(),
            request_context_middleware,
        ))
        .with_state(state);

    let mut router = Router::new()
        .merge(health_controller::router(options.health.clone()))
        .nest("/api/v1", api_router)
        .route("/", get(root));

    if options.server.swagger_enabled {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    if let Some(handle) = options.metrics {
        router = router.route(
            &options.metrics_path,
            get(move || std::future::ready(handle.render())),
        );
    }

    let router = router
        .layer(TimeoutLayer::new(options.server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints under /api/v1");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = server_config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Emporium API v1"
}
