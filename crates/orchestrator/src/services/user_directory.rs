//! User directory trait, in-memory and HTTP implementations.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::UserId;
use reqwest::StatusCode;

use crate::error::UserDirectoryError;

/// Answers whether a user exists.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Succeeds if the directory confirms the user exists.
    async fn validate_user(&self, user_id: UserId) -> Result<(), UserDirectoryError>;
}

#[derive(Debug, Default)]
struct InMemoryUserDirectoryState {
    users: HashSet<UserId>,
    lookups: usize,
    unavailable: bool,
}

/// In-memory user directory for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryUserDirectoryState>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory that knows the given users.
    pub fn with_users(ids: impl IntoIterator<Item = i64>) -> Self {
        let directory = Self::new();
        for id in ids {
            directory.add_user(UserId::new(id));
        }
        directory
    }

    /// Registers a user.
    pub fn add_user(&self, user_id: UserId) {
        self.state.write().unwrap().users.insert(user_id);
    }

    /// Makes every lookup fail as if the directory were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unwrap().unavailable = unavailable;
    }

    /// Returns the number of lookups served, including failed ones.
    pub fn lookup_count(&self) -> usize {
        self.state.read().unwrap().lookups
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn validate_user(&self, user_id: UserId) -> Result<(), UserDirectoryError> {
        let mut state = self.state.write().unwrap();
        state.lookups += 1;

        if state.unavailable {
            return Err(UserDirectoryError::Unavailable(
                "connection refused".to_string(),
            ));
        }

        if state.users.contains(&user_id) {
            Ok(())
        } else {
            Err(UserDirectoryError::NotFound(user_id))
        }
    }
}

/// User directory reached over HTTP at `GET {base_url}/users/get?id=<id>`.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    base_url: String,
    client: reqwest::Client,
}

impl HttpUserDirectory {
    /// Creates a client for the user service at `base_url`.
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: super::trim_base_url(base_url),
            client,
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    #[tracing::instrument(skip(self))]
    async fn validate_user(&self, user_id: UserId) -> Result<(), UserDirectoryError> {
        let url = format!("{}/users/get?id={}", self.base_url, user_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UserDirectoryError::Unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(UserDirectoryError::NotFound(user_id)),
            status => Err(UserDirectoryError::UnexpectedStatus {
                user_id,
                status: status.as_u16(),
            }),
        }
    }
}
