use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::UserId;
use tokio::sync::RwLock;

use super::{Result, UserStore, UserStoreError};
use crate::model::{NewUser, User, registration_timestamp};

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: BTreeMap<UserId, User>,
    next_id: i64,
    fail_on_insert: bool,
}

/// In-memory user store with sequential IDs starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<InMemoryUserState>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every insert.
    pub async fn set_fail_on_insert(&self, fail: bool) {
        self.state.write().await.fail_on_insert = fail;
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut state = self.state.write().await;

        if state.fail_on_insert {
            return Err(UserStoreError::Unavailable("insert rejected".to_string()));
        }

        state.next_id += 1;
        let id = UserId::new(state.next_id);
        let user = User::from_new(id, user, registration_timestamp());
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get(&self, user_id: UserId) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }
}
