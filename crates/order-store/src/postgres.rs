use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use domain::{Money, NewOrder, Order, OrderError, OrderStatus};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{OrderStoreError, Result, store::OrderStore};

/// PostgreSQL-backed order store implementation.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations/orders")
            .run(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let status: String = row.try_get("status")?;

        Ok(Order {
            id: OrderId::new(row.try_get("id")?),
            user_id: UserId::new(row.try_get("user_id")?),
            product: row.try_get("product")?,
            quantity: row.try_get("quantity")?,
            amount: Money::from_cents(row.try_get("amount_cents")?),
            status: status.parse()?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[tracing::instrument(skip(self, order), fields(user_id = %order.user_id))]
    async fn insert(&self, order: NewOrder, created_at: DateTime<Utc>) -> Result<Order> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (user_id, product, quantity, amount_cents, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(order.user_id.as_i64())
        .bind(&order.product)
        .bind(order.quantity)
        .bind(order.amount.cents())
        .bind(OrderStatus::Pending.as_str())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(Order::pending(OrderId::new(id), order, created_at))
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(&self, order_id: OrderId, status: OrderStatus) -> Result<()> {
        if !OrderStatus::Pending.can_transition_to(status) {
            return Err(OrderStoreError::InvalidTransition(
                OrderError::InvalidStatusTransition {
                    from: OrderStatus::Pending,
                    to: status,
                },
            ));
        }

        // Guarded on the current status so a finalized row is never rewritten.
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE orders SET status = $1
            WHERE id = $2 AND status = $3
            RETURNING id
            "#,
        )
        .bind(status.as_str())
        .bind(order_id.as_i64())
        .bind(OrderStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if updated.is_some() {
            return Ok(());
        }

        let current: Option<String> = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
            .bind(order_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        match current {
            None => Err(OrderStoreError::OrderNotFound(order_id)),
            Some(current) => Err(OrderStoreError::AlreadyFinalized {
                order_id,
                current: current.parse()?,
                requested: status,
            }),
        }
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT id, user_id, product, quantity, amount_cents, status, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order).transpose()
    }
}
