//! Order records, status state machine and related types.

mod model;
mod state;
mod value_objects;

pub use model::{NewOrder, Order, creation_timestamp};
pub use state::OrderStatus;
pub use value_objects::Money;

use common::UserId;
use thiserror::Error;

/// Errors raised while validating or transitioning orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// User ID is not a positive integer.
    #[error("Invalid user_id: {user_id} (must be a positive integer)")]
    InvalidUserId { user_id: UserId },

    /// Product descriptor is empty.
    #[error("Product is required")]
    ProductRequired,

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: i32 },

    /// Amount is below zero.
    #[error("Invalid amount: {amount} (must not be negative)")]
    NegativeAmount { amount: f64 },

    /// Amount cannot be held as a whole number of cents.
    #[error("Amount {value} cannot be represented in cents")]
    AmountNotRepresentable { value: f64 },

    /// Status transition not allowed by the state machine.
    #[error("Invalid status transition: cannot move from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// Stored status value is not recognised.
    #[error("Unknown order status: {value}")]
    UnknownStatus { value: String },
}
