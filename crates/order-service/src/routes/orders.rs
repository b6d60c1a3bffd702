//! Order creation and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use common::OrderId;
use domain::{NewOrder, Order};
use orchestrator::{OrderOrchestrator, PaymentProcessor, UserDirectory};
use order_store::OrderStore;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S, U, P>
where
    S: OrderStore,
    U: UserDirectory,
    P: PaymentProcessor,
{
    pub orchestrator: OrderOrchestrator<S, U, P>,
}

impl<S, U, P> AppState<S, U, P>
where
    S: OrderStore,
    U: UserDirectory,
    P: PaymentProcessor,
{
    pub fn new(orchestrator: OrderOrchestrator<S, U, P>) -> Self {
        Self { orchestrator }
    }
}

/// POST /orders: create an order and run it through payment.
///
/// Responds 200 with the order whether the payment succeeded or not;
/// the `status` field tells them apart.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S, U, P>(
    State(state): State<Arc<AppState<S, U, P>>>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> Result<Json<Order>, ApiError>
where
    S: OrderStore + 'static,
    U: UserDirectory + 'static,
    P: PaymentProcessor + 'static,
{
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let order = state.orchestrator.create_order(request).await?;
    Ok(Json(order))
}

/// GET /orders/{id}: load a persisted order.
#[tracing::instrument(skip(state))]
pub async fn get<S, U, P>(
    State(state): State<Arc<AppState<S, U, P>>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError>
where
    S: OrderStore + 'static,
    U: UserDirectory + 'static,
    P: PaymentProcessor + 'static,
{
    let order_id: OrderId = id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid order ID {id:?}: {e}")))?;

    state
        .orchestrator
        .get_order(order_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Order {order_id} not found")))
}
