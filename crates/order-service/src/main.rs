//! Order service entry point.

use std::sync::Arc;

use orchestrator::{HttpPaymentProcessor, HttpUserDirectory, OrderOrchestrator, http_client};
use order_service::config::Config;
use order_service::routes::orders::AppState;
use order_store::{InMemoryOrderStore, OrderStore, PostgresOrderStore};
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

async fn connect_store(config: &Config) -> Arc<dyn OrderStore> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, orders are kept in memory");
        return Arc::new(InMemoryOrderStore::new());
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(url)
        .await
        .expect("failed to connect to database");
    let store = PostgresOrderStore::new(pool);
    store
        .run_migrations()
        .await
        .expect("failed to run order migrations");
    tracing::info!("connected to PostgreSQL order store");

    Arc::new(store)
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Wire the store and the upstream services
    let store = connect_store(&config).await;
    let client = http_client(config.upstream_timeout).expect("failed to build HTTP client");
    let users = HttpUserDirectory::new(config.user_service_url.as_str(), client.clone());
    let payments = HttpPaymentProcessor::new(config.payment_service_url.as_str(), client);
    tracing::info!(
        user_service = %users.base_url(),
        payment_service = %payments.base_url(),
        timeout_ms = config.upstream_timeout.as_millis() as u64,
        "upstream services configured"
    );

    let state = Arc::new(AppState::new(OrderOrchestrator::new(store, users, payments)));

    // 4. Build the application
    let app = order_service::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting order service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("order service shut down gracefully");
}
