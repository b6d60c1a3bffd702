//! Order records and creation requests.

use chrono::{DateTime, SubsecRound, Utc};
use common::{OrderId, UserId};
use serde::{Deserialize, Serialize};

use super::{Money, OrderError, OrderStatus};

/// A candidate order as submitted by a client.
///
/// Carries no identifier, status or timestamp; those are assigned when
/// the order is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product: String,
    pub quantity: i32,
    pub amount: Money,
}

impl NewOrder {
    /// Creates a new order request.
    pub fn new(
        user_id: impl Into<UserId>,
        product: impl Into<String>,
        quantity: i32,
        amount: Money,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            product: product.into(),
            quantity,
            amount,
        }
    }

    /// Checks field constraints. Reports the first violation found.
    pub fn validate(&self) -> Result<(), OrderError> {
        if !self.user_id.is_valid() {
            return Err(OrderError::InvalidUserId {
                user_id: self.user_id,
            });
        }
        if self.product.trim().is_empty() {
            return Err(OrderError::ProductRequired);
        }
        if self.quantity <= 0 {
            return Err(OrderError::InvalidQuantity {
                quantity: self.quantity,
            });
        }
        if self.amount.is_negative() {
            return Err(OrderError::NegativeAmount {
                amount: self.amount.as_decimal(),
            });
        }
        Ok(())
    }
}

/// A persisted order and its processing outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub product: String,
    pub quantity: i32,
    pub amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds the pending record for a freshly inserted order.
    pub fn pending(id: OrderId, new_order: NewOrder, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new_order.user_id,
            product: new_order.product,
            quantity: new_order.quantity,
            amount: new_order.amount,
            status: OrderStatus::Pending,
            created_at,
        }
    }

    /// Moves the order to `next`, rejecting transitions the state machine forbids.
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Returns true once the order has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Current time truncated to the microsecond precision Postgres keeps.
pub fn creation_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
