//! Orchestration error types.

use common::{OrderId, UserId};
use domain::{OrderError, OrderStatus};
use order_store::OrderStoreError;
use thiserror::Error;

/// Errors returned by the user directory.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// The directory has no such user.
    #[error("User {0} not found")]
    NotFound(UserId),

    /// The directory answered with a status other than success or not-found.
    #[error("User directory returned status {status} for user {user_id}")]
    UnexpectedStatus { user_id: UserId, status: u16 },

    /// The directory could not be reached or timed out.
    #[error("User service unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by the payment processor.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The processor answered with a non-success status.
    #[error("Payment rejected for order {order_id} (status {status})")]
    Rejected { order_id: OrderId, status: u16 },

    /// The processor could not be reached or timed out.
    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while creating or loading orders.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The request violates an order constraint.
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderError),

    /// The user does not exist or the directory could not confirm it.
    #[error("User validation failed: {0}")]
    UserValidationFailed(#[source] UserDirectoryError),

    /// The pending order could not be inserted.
    #[error("Failed to persist order: {0}")]
    PersistenceFailed(#[source] OrderStoreError),

    /// The payment attempt failed; reported, never returned by `create_order`.
    #[error("Payment failed for order {order_id}: {source}")]
    PaymentFailed {
        order_id: OrderId,
        #[source]
        source: PaymentError,
    },

    /// Recording the terminal status failed; reported, never returned by `create_order`.
    #[error("Failed to record status {status} for order {order_id}: {source}")]
    StatusUpdateFailed {
        order_id: OrderId,
        status: OrderStatus,
        #[source]
        source: OrderStoreError,
    },

    /// Order store error outside the creation workflow.
    #[error("Order store error: {0}")]
    Store(#[from] OrderStoreError),
}

/// Convenience type alias for orchestration results.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
