use common::OrderId;
use domain::{OrderError, OrderStatus};
use thiserror::Error;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// No order exists with the given ID.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order already holds a terminal status and cannot be updated.
    #[error("Order {order_id} is already {current}; cannot move to {requested}")]
    AlreadyFinalized {
        order_id: OrderId,
        current: OrderStatus,
        requested: OrderStatus,
    },

    /// The requested status is not reachable from `pending`.
    #[error("Invalid status update: {0}")]
    InvalidTransition(OrderError),

    /// A stored row could not be mapped back to an order.
    #[error("Corrupt order row: {0}")]
    Corrupt(#[from] OrderError),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The backend refused the operation (used by test doubles).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, OrderStoreError>;
