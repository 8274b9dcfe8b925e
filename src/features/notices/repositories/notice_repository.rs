use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notices::models::{CreateNotice, Notice, NoticeStatus, UpdateNotice};

const NOTICE_COLUMNS: &str = r#"
    id, target, title, employee_id, employee_name, position, notice_type,
    publish_date, notice_body, attachment_name, attachment_path, status,
    created_at, updated_at
"#;

/// Persistence for notice records.
///
/// Single-record writes and the publish sweep must each be one atomic
/// statement; the service never reads a record before writing it.
#[async_trait]
pub trait NoticeRepository: Send + Sync {
    async fn insert(&self, notice: CreateNotice) -> Result<Notice>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>>;

    /// All notices, optionally filtered by status, newest first
    async fn list(&self, status: Option<NoticeStatus>) -> Result<Vec<Notice>>;

    /// Returns `None` when no notice has this id
    async fn update(&self, id: Uuid, changes: UpdateNotice) -> Result<Option<Notice>>;

    /// Returns `None` when no notice has this id
    async fn update_status(&self, id: Uuid, status: NoticeStatus) -> Result<Option<Notice>>;

    /// Move every Unpublished notice whose publish date is at or before `now`
    /// to Published. Returns the number of notices changed.
    async fn publish_due(&self, now: DateTime<Utc>) -> Result<u64>;
}

/// Postgres-backed notice repository
pub struct PgNoticeRepository {
    pool: PgPool,
}

impl PgNoticeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoticeRepository for PgNoticeRepository {
    async fn insert(&self, notice: CreateNotice) -> Result<Notice> {
        let (attachment_name, attachment_path) = notice
            .attachment
            .map(|a| (a.name, a.path))
            .unwrap_or_default();

        let sql = format!(
            r#"
            INSERT INTO notices (
                target, title, employee_id, employee_name, position, notice_type,
                publish_date, notice_body, attachment_name, attachment_path, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            NOTICE_COLUMNS
        );

        sqlx::query_as::<_, Notice>(&sql)
            .bind(notice.target)
            .bind(notice.title)
            .bind(notice.employee_id)
            .bind(notice.employee_name)
            .bind(notice.position)
            .bind(notice.notice_type)
            .bind(notice.publish_date)
            .bind(notice.notice_body)
            .bind(attachment_name)
            .bind(attachment_path)
            .bind(notice.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert notice: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>> {
        let sql = format!("SELECT {} FROM notices WHERE id = $1", NOTICE_COLUMNS);

        sqlx::query_as::<_, Notice>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get notice by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list(&self, status: Option<NoticeStatus>) -> Result<Vec<Notice>> {
        let query = match status {
            Some(status) => {
                let sql = format!(
                    "SELECT {} FROM notices WHERE status = $1 ORDER BY created_at DESC",
                    NOTICE_COLUMNS
                );
                sqlx::query_as::<_, Notice>(&sql)
                    .bind(status)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM notices ORDER BY created_at DESC",
                    NOTICE_COLUMNS
                );
                sqlx::query_as::<_, Notice>(&sql)
                    .fetch_all(&self.pool)
                    .await
            }
        };

        query.map_err(|e| {
            tracing::error!("Failed to list notices: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update(&self, id: Uuid, changes: UpdateNotice) -> Result<Option<Notice>> {
        let (attachment_name, attachment_path) = match changes.attachment {
            Some(a) => (Some(a.name), Some(a.path)),
            None => (None, None),
        };

        // NULL position and attachment parameters keep the stored values
        let sql = format!(
            r#"
            UPDATE notices
            SET target = $2,
                title = $3,
                employee_id = $4,
                employee_name = $5,
                position = CASE WHEN $6::TEXT IS NULL THEN position ELSE NULLIF($6, '') END,
                notice_type = $7,
                publish_date = $8,
                notice_body = $9,
                status = $10,
                attachment_name = COALESCE($11, attachment_name),
                attachment_path = COALESCE($12, attachment_path),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            NOTICE_COLUMNS
        );

        sqlx::query_as::<_, Notice>(&sql)
            .bind(id)
            .bind(changes.target)
            .bind(changes.title)
            .bind(changes.employee_id)
            .bind(changes.employee_name)
            .bind(changes.position)
            .bind(changes.notice_type)
            .bind(changes.publish_date)
            .bind(changes.notice_body)
            .bind(changes.status)
            .bind(attachment_name)
            .bind(attachment_path)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update notice: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update_status(&self, id: Uuid, status: NoticeStatus) -> Result<Option<Notice>> {
        let sql = format!(
            r#"
            UPDATE notices
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            NOTICE_COLUMNS
        );

        sqlx::query_as::<_, Notice>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update notice status: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn publish_due(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notices
            SET status = $1, updated_at = NOW()
            WHERE status = $2
              AND publish_date IS NOT NULL
              AND publish_date <= $3
            "#,
        )
        .bind(NoticeStatus::Published)
        .bind(NoticeStatus::Unpublished)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to publish due notices: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }
}
