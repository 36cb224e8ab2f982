//! GA Dashboard REST API
//!
//! HTTP API layer, built with Axum.
//!
//! # Endpoints
//!
//! ## Analytics
//! - `GET /analytics/events` - Event names with counts
//! - `GET /analytics/clicks-per-page` - Click counts per page
//! - `GET /analytics/session-duration` - Average session duration
//! - `GET /analytics/engaged-sessions` - Engaged sessions
//! - `GET /analytics/bounce-rate` - Bounce rate
//! - `GET /analytics/views-per-session` - Views per session
//! - `GET /analytics/users-by-city` - Active users per city
//! - `GET /analytics/page-views` - Views per page path
//! - `GET /analytics/users-by-country` - Active users per country
//! - `GET /analytics/new-vs-returning` - New vs returning users
//! - `GET /analytics/top-browsers` - Users per browser
//! - `GET /analytics/device-category` - Users per device category
//! - `GET /analytics/traffic-sources` - Sessions per source/medium
//!
//! ## Docs
//! - `GET /api-docs` - Swagger UI
//! - `GET /api-docs/openapi.json` - OpenAPI document
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use ga_dashboard::api::{serve, AppState};
//! use ga_dashboard::config::Config;
//! use ga_dashboard::ga::GaDataClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = GaDataClient::with_credentials(
//!         config.analytics.client_config(),
//!         config.analytics.credentials_path.as_deref(),
//!     )
//!     .await?;
//!
//!     let state = AppState::new(Arc::new(client), &config.analytics, config.server.clone());
//!     serve(state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::State,
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::report::REPORTS;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let mut router = Router::new()
        .route("/api-docs", get(routes::docs::swagger_ui_html))
        .route("/api-docs/openapi.json", get(routes::docs::openapi_json))
        .nest("/health", health_routes);

    for definition in REPORTS {
        router = router.route(
            definition.path,
            get(move |state: State<Arc<AppState>>| {
                routes::analytics::run_report(state, definition)
            }),
        );
    }

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive CORS when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET])
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("GA Dashboard API listening on {}", addr);
    tracing::info!("API docs available at http://{}/api-docs", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("GA Dashboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
