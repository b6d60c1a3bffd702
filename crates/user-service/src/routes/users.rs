//! User registration and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use common::UserId;
use serde::Deserialize;

use crate::error::ApiError;
use crate::model::{NewUser, User};
use crate::store::UserStore;

const USER_NOT_FOUND: &str = "User not found";

/// Shared application state accessible from all handlers.
pub struct AppState<S: UserStore> {
    pub store: S,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub id: Option<String>,
}

/// POST /users: register a user.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(new_user) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    new_user.validate()?;

    let user = state.store.insert(new_user).await?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok(Json(user))
}

/// GET /users/get?id=<id>: look a user up.
///
/// A missing or unparseable id is answered like an unknown user.
#[tracing::instrument(skip(state))]
pub async fn get<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<User>, ApiError> {
    let Some(user_id) = query.id.and_then(|id| id.parse::<UserId>().ok()) else {
        return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
    };

    state
        .store
        .get(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))
}
