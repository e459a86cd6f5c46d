//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::user::{ExternalId, User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::map_sqlx_error;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_external_id(&self, id: &ExternalId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, external_id, is_active, created_at
            FROM users
            WHERE external_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    async fn create(&self, external_id: &ExternalId) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (external_id, is_active)
            VALUES ($1, TRUE)
            RETURNING id, external_id, is_active, created_at
            "#,
        )
        .bind(external_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to create user"))?;

        row_to_user(&row)
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: Uuid = row.get("id");
    let external_id: String = row.get("external_id");
    let is_active: bool = row.get("is_active");
    let created_at: DateTime<Utc> = row.get("created_at");

    let external_id = ExternalId::new(external_id)
        .map_err(|e| DomainError::storage(format!("Invalid external ID in database: {}", e)))?;

    Ok(User::from_parts(
        UserId::from(id),
        external_id,
        is_active,
        created_at,
    ))
}
