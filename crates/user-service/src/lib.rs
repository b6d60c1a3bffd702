//! HTTP user directory.
//!
//! Registers users and answers lookups by ID for the order service.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use model::{NewUser, User, UserError};
pub use routes::users::AppState;
pub use store::{InMemoryUserStore, PostgresUserStore, UserStore, UserStoreError};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: UserStore + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/users", post(routes::users::create::<S>))
        .route("/users/get", get(routes::users::get::<S>))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
