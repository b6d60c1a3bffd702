use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{NewOrder, Order, OrderStatus};

use crate::Result;

/// Core trait for order store implementations.
///
/// Each operation is its own atomic unit; no transaction spans an insert
/// and the later status update. All implementations must be thread-safe.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order with status `pending`.
    ///
    /// The store assigns the identifier and returns the stored record.
    async fn insert(&self, order: NewOrder, created_at: DateTime<Utc>) -> Result<Order>;

    /// Moves a pending order to `status`.
    ///
    /// Fails with `OrderNotFound` for an unknown ID and with
    /// `AlreadyFinalized` if the order has left `pending`.
    async fn update_status(&self, order_id: OrderId, status: OrderStatus) -> Result<()>;

    /// Loads an order by ID. Returns None if it doesn't exist.
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>>;
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    async fn insert(&self, order: NewOrder, created_at: DateTime<Utc>) -> Result<Order> {
        (**self).insert(order, created_at).await
    }

    async fn update_status(&self, order_id: OrderId, status: OrderStatus) -> Result<()> {
        (**self).update_status(order_id, status).await
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        (**self).get(order_id).await
    }
}
