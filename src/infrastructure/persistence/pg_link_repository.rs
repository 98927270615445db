//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkPatch, NewShortLink, RedirectStatus, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str =
    "id, code, original_url, owner_id, clicks, tags, is_active, redirect_status, created_at, updated_at";

/// PostgreSQL repository for short link storage.
///
/// The `links_code_key` unique constraint is the final arbiter of code
/// uniqueness; a losing insert in a creation race surfaces as
/// [`AppError::Conflict`] through the sqlx error mapping.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    original_url: String,
    owner_id: Option<i64>,
    clicks: i64,
    tags: Vec<String>,
    is_active: bool,
    redirect_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for ShortLink {
    fn from(row: LinkRow) -> Self {
        ShortLink {
            id: row.id,
            code: row.code,
            original_url: row.original_url,
            owner_id: row.owner_id,
            clicks: row.clicks,
            tags: row.tags,
            is_active: row.is_active,
            // The column carries a CHECK constraint; an unparseable value
            // cannot come out of the store
            redirect_status: RedirectStatus::parse(&row.redirect_status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "INSERT INTO links (code, original_url, owner_id, tags)
             VALUES ($1, $2, $3, $4)
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(&new_link.code)
        .bind(&new_link.original_url)
        .bind(new_link.owner_id)
        .bind(&new_link.tags)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ShortLink>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE owner_id = $1 ORDER BY id"
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "UPDATE links SET
                 original_url    = COALESCE($2::text, original_url),
                 tags            = COALESCE($3::text[], tags),
                 is_active       = COALESCE($4::boolean, is_active),
                 redirect_status = COALESCE($5::text, redirect_status),
                 updated_at      = NOW()
             WHERE id = $1
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.original_url)
        .bind(patch.tags)
        .bind(patch.is_active)
        .bind(patch.redirect_status.map(|s| s.as_str()))
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| {
            AppError::not_found("URL not found", serde_json::json!({ "id": id }))
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        // Single store-side add: concurrent redirects never lose updates
        sqlx::query("UPDATE links SET clicks = clicks + 1, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
