//! Order persistence.
//!
//! The [`OrderStore`] trait is the narrow interface the orchestrator uses:
//! insert a pending order, update its status once, and read it back.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{OrderStoreError, Result};
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use store::OrderStore;
