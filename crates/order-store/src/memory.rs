use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{NewOrder, Order, OrderError, OrderStatus};
use tokio::sync::RwLock;

use crate::{OrderStoreError, Result, store::OrderStore};

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: BTreeMap<OrderId, Order>,
    next_id: i64,
    insert_calls: usize,
    update_calls: usize,
    fail_on_insert: bool,
    fail_on_update: bool,
}

/// In-memory order store implementation for testing.
///
/// Behaves like the PostgreSQL store (sequential IDs starting at 1,
/// updates only out of `pending`) and can be told to fail inserts or
/// updates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every insert.
    pub async fn set_fail_on_insert(&self, fail: bool) {
        self.state.write().await.fail_on_insert = fail;
    }

    /// Configures the store to fail every status update.
    pub async fn set_fail_on_update(&self, fail: bool) {
        self.state.write().await.fail_on_update = fail;
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns all stored orders ordered by ID.
    pub async fn orders(&self) -> Vec<Order> {
        self.state.read().await.orders.values().cloned().collect()
    }

    /// Returns how many times `insert` was called, including failed calls.
    pub async fn insert_calls(&self) -> usize {
        self.state.read().await.insert_calls
    }

    /// Returns how many times `update_status` was called, including failed calls.
    pub async fn update_calls(&self) -> usize {
        self.state.read().await.update_calls
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: NewOrder, created_at: DateTime<Utc>) -> Result<Order> {
        let mut state = self.state.write().await;
        state.insert_calls += 1;

        if state.fail_on_insert {
            return Err(OrderStoreError::Unavailable(
                "insert rejected".to_string(),
            ));
        }

        state.next_id += 1;
        let id = OrderId::new(state.next_id);
        let stored = Order::pending(id, order, created_at);
        state.orders.insert(id, stored.clone());

        Ok(stored)
    }

    async fn update_status(&self, order_id: OrderId, status: OrderStatus) -> Result<()> {
        let mut state = self.state.write().await;
        state.update_calls += 1;

        if state.fail_on_update {
            return Err(OrderStoreError::Unavailable(
                "update rejected".to_string(),
            ));
        }

        if !OrderStatus::Pending.can_transition_to(status) {
            return Err(OrderStoreError::InvalidTransition(
                OrderError::InvalidStatusTransition {
                    from: OrderStatus::Pending,
                    to: status,
                },
            ));
        }

        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or(OrderStoreError::OrderNotFound(order_id))?;

        if order.status != OrderStatus::Pending {
            return Err(OrderStoreError::AlreadyFinalized {
                order_id,
                current: order.status,
                requested: status,
            });
        }

        order.status = status;
        Ok(())
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.state.read().await.orders.get(&order_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Money, creation_timestamp};

    fn new_order() -> NewOrder {
        NewOrder::new(1, "Widget", 2, Money::from_cents(1500))
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = InMemoryOrderStore::new();

        let first = store.insert(new_order(), creation_timestamp()).await.unwrap();
        let second = store.insert(new_order(), creation_timestamp()).await.unwrap();

        assert_eq!(first.id, OrderId::new(1));
        assert_eq!(second.id, OrderId::new(2));
        assert_eq!(first.status, OrderStatus::Pending);
        assert_eq!(store.order_count().await, 2);
    }

    #[tokio::test]
    async fn insert_then_get() {
        let store = InMemoryOrderStore::new();
        let created_at = creation_timestamp();

        let order = store.insert(new_order(), created_at).await.unwrap();
        let loaded = store.get(order.id).await.unwrap().unwrap();

        assert_eq!(loaded, order);
        assert_eq!(loaded.created_at, created_at);
        assert!(store.get(OrderId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_moves_pending_to_terminal_once() {
        let store = InMemoryOrderStore::new();
        let order = store.insert(new_order(), creation_timestamp()).await.unwrap();

        store
            .update_status(order.id, OrderStatus::Completed)
            .await
            .unwrap();
        let loaded = store.get(order.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Completed);

        let again = store
            .update_status(order.id, OrderStatus::PaymentFailed)
            .await;
        assert!(matches!(
            again,
            Err(OrderStoreError::AlreadyFinalized {
                current: OrderStatus::Completed,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn update_unknown_order() {
        let store = InMemoryOrderStore::new();
        let result = store
            .update_status(OrderId::new(42), OrderStatus::Completed)
            .await;
        assert!(matches!(result, Err(OrderStoreError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn update_back_to_pending_is_rejected() {
        let store = InMemoryOrderStore::new();
        let order = store.insert(new_order(), creation_timestamp()).await.unwrap();

        let result = store.update_status(order.id, OrderStatus::Pending).await;
        assert!(matches!(result, Err(OrderStoreError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn failure_toggles() {
        let store = InMemoryOrderStore::new();
        store.set_fail_on_insert(true).await;

        assert!(store.insert(new_order(), creation_timestamp()).await.is_err());
        assert_eq!(store.order_count().await, 0);
        assert_eq!(store.insert_calls().await, 1);

        store.set_fail_on_insert(false).await;
        let order = store.insert(new_order(), creation_timestamp()).await.unwrap();

        store.set_fail_on_update(true).await;
        assert!(
            store
                .update_status(order.id, OrderStatus::Completed)
                .await
                .is_err()
        );
        let loaded = store.get(order.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Pending);
        assert_eq!(store.update_calls().await, 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        let store = InMemoryOrderStore::new();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(new_order(), creation_timestamp())
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 16);
        assert_eq!(store.order_count().await, 16);
    }
}
