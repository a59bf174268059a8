//! PostgreSQL implementation of the owner registry.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE owners (
//!     id         BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
//!     email      TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     CONSTRAINT owners_email_key UNIQUE (email)
//! );
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewOwner, Owner};
use crate::domain::repositories::OwnerRepository;
use crate::error::{StoreError, is_unique_violation_on, map_sqlx_error};

/// Name of the unique constraint on the email column.
const EMAIL_CONSTRAINT: &str = "owners_email_key";

/// PostgreSQL repository for link owners.
pub struct PgOwnerRepository {
    pool: Arc<PgPool>,
}

impl PgOwnerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerRepository for PgOwnerRepository {
    async fn create(&self, new_owner: NewOwner) -> Result<Owner, StoreError> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            INSERT INTO owners (email)
            VALUES ($1)
            RETURNING id, email, created_at, updated_at
            "#,
        )
        .bind(&new_owner.email)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, EMAIL_CONSTRAINT) {
                StoreError::EmailTaken
            } else {
                map_sqlx_error(e)
            }
        })?;

        Ok(owner)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Owner>, StoreError> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            SELECT id, email, created_at, updated_at
            FROM owners
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(owner)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Owner>, StoreError> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            SELECT id, email, created_at, updated_at
            FROM owners
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(owner)
    }
}
