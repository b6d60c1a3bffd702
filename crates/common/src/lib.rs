//! Identifier types shared by the order and user services.

mod types;

pub use types::{OrderId, UserId};
