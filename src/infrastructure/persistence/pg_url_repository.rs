//! PostgreSQL implementation of the short link repository.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE short_links (
//!     id          BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
//!     owner_id    BIGINT NOT NULL,
//!     target_url  TEXT NOT NULL,
//!     code        VARCHAR(8) NOT NULL,
//!     click_count BIGINT NOT NULL DEFAULT 0,
//!     disabled    BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     CONSTRAINT short_links_code_key UNIQUE (code)
//! );
//!
//! CREATE INDEX short_links_owner_id_idx ON short_links (owner_id);
//! ```
//!
//! The `short_links_code_key` constraint is what makes concurrent
//! allocation safe: the database arbitrates which of two simultaneous
//! inserts of the same code wins.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::UrlRepository;
use crate::error::{StoreError, is_unique_violation_on, map_sqlx_error};

/// Name of the unique constraint on the code column.
const CODE_CONSTRAINT: &str = "short_links_code_key";

/// PostgreSQL repository for short link storage and click counting.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert_unique(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            INSERT INTO short_links (owner_id, target_url, code)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, target_url, code, click_count, disabled,
                      created_at, updated_at
            "#,
        )
        .bind(new_link.owner_id)
        .bind(&new_link.target_url)
        .bind(&new_link.code)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, CODE_CONSTRAINT) {
                StoreError::CodeTaken
            } else {
                map_sqlx_error(e)
            }
        })?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, owner_id, target_url, code, click_count, disabled,
                   created_at, updated_at
            FROM short_links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(link)
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ShortLink>, StoreError> {
        let links = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, owner_id, target_url, code, click_count, disabled,
                   created_at, updated_at
            FROM short_links
            WHERE owner_id = $1
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(links)
    }

    async fn increment_clicks(&self, code: &str) -> Result<u64, StoreError> {
        // One indivisible statement, never a read-modify-write pair:
        // concurrent increments serialize on the row and none are lost.
        // The disabled guard keeps increments off links disabled after
        // the caller's read.
        let result = sqlx::query(
            r#"
            UPDATE short_links
            SET click_count = click_count + 1, updated_at = NOW()
            WHERE code = $1 AND NOT disabled
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
