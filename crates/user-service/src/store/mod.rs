//! User persistence.

pub mod error;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use common::UserId;

use crate::model::{NewUser, User};

pub use error::{Result, UserStoreError};
pub use memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;

/// Storage for registered users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a user; the store assigns the identifier.
    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Loads a user by ID. Returns None if it doesn't exist.
    async fn get(&self, user_id: UserId) -> Result<Option<User>>;
}

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    async fn insert(&self, user: NewUser) -> Result<User> {
        (**self).insert(user).await
    }

    async fn get(&self, user_id: UserId) -> Result<Option<User>> {
        (**self).get(user_id).await
    }
}
