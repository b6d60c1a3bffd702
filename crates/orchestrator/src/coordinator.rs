//! Orchestrator for the order creation workflow.

use std::time::Instant;

use common::OrderId;
use domain::{NewOrder, Order, OrderStatus, creation_timestamp};
use order_store::OrderStore;

use crate::error::OrchestratorError;
use crate::services::payment::PaymentProcessor;
use crate::services::user_directory::UserDirectory;

/// Coordinates user validation, order persistence and payment for one
/// order creation request.
///
/// Collaborators are injected, so tests substitute in-memory fakes for
/// the store, the user directory and the payment processor. The insert
/// and the final status update are separate store operations: a
/// concurrent reader may observe `pending` between them.
pub struct OrderOrchestrator<S, U, P>
where
    S: OrderStore,
    U: UserDirectory,
    P: PaymentProcessor,
{
    store: S,
    users: U,
    payments: P,
}

impl<S, U, P> OrderOrchestrator<S, U, P>
where
    S: OrderStore,
    U: UserDirectory,
    P: PaymentProcessor,
{
    /// Creates a new orchestrator.
    pub fn new(store: S, users: U, payments: P) -> Self {
        Self {
            store,
            users,
            payments,
        }
    }

    /// Returns the order store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates an order: validate user → insert pending → charge → finalize.
    ///
    /// Returns the order with its terminal status on every path that got
    /// past the insert, including a failed payment. Only invalid input,
    /// a failed user validation or a failed insert produce an error.
    #[tracing::instrument(
        skip(self, request),
        fields(user_id = %request.user_id, order_id = tracing::field::Empty)
    )]
    pub async fn create_order(&self, request: NewOrder) -> Result<Order, OrchestratorError> {
        let started = Instant::now();
        request.validate()?;

        // 1. Validate the user
        if let Err(e) = self.users.validate_user(request.user_id).await {
            metrics::counter!("user_validation_failures_total").increment(1);
            tracing::warn!(error = %e, "user validation failed");
            return Err(OrchestratorError::UserValidationFailed(e));
        }

        // 2. Persist the pending order
        let mut order = self
            .store
            .insert(request, creation_timestamp())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to persist order");
                OrchestratorError::PersistenceFailed(e)
            })?;
        tracing::Span::current().record("order_id", order.id.as_i64());
        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(status = %order.status, "order persisted");

        // 3. Charge the payment processor
        let outcome = self.payments.charge(order.id, order.amount).await;
        let status = OrderStatus::after_payment(outcome.is_ok());
        match outcome {
            Ok(()) => {
                metrics::counter!("orders_completed_total").increment(1);
            }
            Err(source) => {
                let err = OrchestratorError::PaymentFailed {
                    order_id: order.id,
                    source,
                };
                metrics::counter!("orders_payment_failed_total").increment(1);
                tracing::warn!(error = %err, "payment failed");
            }
        }

        // 4. Record the terminal status; a failure here is reported only
        if let Err(e) = order.transition_to(status) {
            tracing::error!(error = %e, "order left pending before payment completed");
        }
        self.finalize(order.id, status).await;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("order_creation_duration_seconds").record(duration);
        tracing::info!(status = %order.status, duration, "order finalized");

        Ok(order)
    }

    /// Loads an order by ID.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>, OrchestratorError> {
        Ok(self.store.get(order_id).await?)
    }

    async fn finalize(&self, order_id: OrderId, status: OrderStatus) {
        if let Err(source) = self.store.update_status(order_id, status).await {
            let err = OrchestratorError::StatusUpdateFailed {
                order_id,
                status,
                source,
            };
            metrics::counter!("order_status_update_failures_total").increment(1);
            tracing::error!(error = %err, "failed to record final order status");
        }
    }
}
