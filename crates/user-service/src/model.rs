//! User records and registration requests.

use chrono::{DateTime, SubsecRound, Utc};
use common::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for a registration request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Name is required")]
    NameRequired,

    #[error("Email is required")]
    EmailRequired,
}

/// A user registration as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Rejects blank names and emails.
    pub fn validate(&self) -> Result<(), UserError> {
        if self.name.trim().is_empty() {
            return Err(UserError::NameRequired);
        }
        if self.email.trim().is_empty() {
            return Err(UserError::EmailRequired);
        }
        Ok(())
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_new(id: UserId, new_user: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            created_at,
        }
    }
}

/// Current time at the precision PostgreSQL stores.
pub fn registration_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
