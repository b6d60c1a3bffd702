//! Domain layer for the order service.
//!
//! This crate provides:
//! - `NewOrder` requests and their validation rules
//! - the persisted `Order` record
//! - the `OrderStatus` state machine (`pending` → `completed` | `payment_failed`)
//! - `Money`, an amount held in cents

pub mod order;

pub use order::{Money, NewOrder, Order, OrderError, OrderStatus, creation_timestamp};
