//! HTTP order service.
//!
//! Exposes order creation and lookup backed by [`orchestrator::OrderOrchestrator`],
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{PaymentProcessor, UserDirectory};
use order_store::OrderStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, U, P>(state: Arc<AppState<S, U, P>>, metrics_handle: PrometheusHandle) -> Router
where
    S: OrderStore + 'static,
    U: UserDirectory + 'static,
    P: PaymentProcessor + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create::<S, U, P>))
        .route("/orders/{id}", get(routes::orders::get::<S, U, P>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
