use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::UserId;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::{Result, UserStore};
use crate::model::{NewUser, User, registration_timestamp};

/// PostgreSQL-backed user store.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations/users")
            .run(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_user(row: PgRow) -> Result<User> {
        Ok(User {
            id: UserId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(skip(self, user))]
    async fn insert(&self, user: NewUser) -> Result<User> {
        let created_at = registration_timestamp();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, created_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = id, "user inserted");
        Ok(User::from_new(UserId::new(id), user, created_at))
    }

    async fn get(&self, user_id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }
}
