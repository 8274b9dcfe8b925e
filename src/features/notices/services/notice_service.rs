use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::notices::dtos::{NoticeFieldsDto, NoticeResponseDto, NoticeUploadDto};
use crate::features::notices::models::{Attachment, CreateNotice, NoticeStatus, UpdateNotice};
use crate::features::notices::repositories::NoticeRepository;
use crate::modules::storage::LocalFileStore;
use crate::shared::constants::DRAFT_STATUS_HINT;
use crate::shared::validation::validation_messages;

/// Parse a client supplied publish date.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM[:SS]` (UTC) and plain
/// `YYYY-MM-DD` dates (midnight UTC). Empty input means no publish date.
pub fn parse_publish_date(raw: &str) -> Result<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(naive.and_utc()));
        }
    }

    if let Some(naive) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(naive.and_utc()));
    }

    Err(AppError::validation(format!("Invalid publishDate '{}'", raw)))
}

fn parse_notice_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::validation(format!("Invalid notice id '{}'", id)))
}

fn not_found() -> AppError {
    AppError::NotFound("Notice not found".to_string())
}

/// A blank publish date counts as a missing one
fn trim_publish_date(mut fields: NoticeFieldsDto) -> NoticeFieldsDto {
    let trimmed = fields.publish_date.trim();
    if trimmed.len() != fields.publish_date.len() {
        fields.publish_date = trimmed.to_string();
    }
    fields
}

fn validate_required(fields: &NoticeFieldsDto) -> Result<()> {
    fields.validate().map_err(|e| AppError::Validation {
        message: "Missing required fields".to_string(),
        errors: validation_messages(&e),
    })
}

/// Empty position is stored as absent
fn normalize_position(position: Option<String>) -> Option<String> {
    position.filter(|p| !p.is_empty())
}

/// Notice lifecycle: creation, listing with the publish sweep, updates and
/// manual status changes
pub struct NoticeService {
    repository: Arc<dyn NoticeRepository>,
    file_store: Arc<LocalFileStore>,
}

impl NoticeService {
    pub fn new(repository: Arc<dyn NoticeRepository>, file_store: Arc<LocalFileStore>) -> Self {
        Self {
            repository,
            file_store,
        }
    }

    async fn store_upload(&self, upload: Option<NoticeUploadDto>) -> Result<Option<Attachment>> {
        let Some(upload) = upload else {
            return Ok(None);
        };

        let stored = self.file_store.store(&upload.file_name, &upload.data).await?;
        debug!("Attachment '{}' stored as {}", upload.file_name, stored.stored_name);
        Ok(Some(Attachment {
            name: upload.file_name,
            path: stored.public_path,
        }))
    }

    /// Create a notice.
    ///
    /// A `status_hint` of exactly "Draft" skips required field validation and
    /// saves the notice as Draft; anything else creates an Unpublished notice.
    pub async fn create_notice(
        &self,
        fields: NoticeFieldsDto,
        status_hint: Option<&str>,
        upload: Option<NoticeUploadDto>,
    ) -> Result<NoticeResponseDto> {
        let fields = trim_publish_date(fields);
        let is_draft = status_hint == Some(DRAFT_STATUS_HINT);
        if !is_draft {
            validate_required(&fields)?;
        }

        let publish_date = parse_publish_date(&fields.publish_date)?;
        let attachment = self.store_upload(upload).await?;

        let status = if is_draft {
            NoticeStatus::Draft
        } else {
            NoticeStatus::Unpublished
        };

        let notice = self
            .repository
            .insert(CreateNotice {
                target: fields.target,
                title: fields.title,
                employee_id: fields.employee_id,
                employee_name: fields.employee_name,
                position: normalize_position(fields.position),
                notice_type: fields.notice_type,
                publish_date,
                notice_body: fields.notice_body,
                attachment,
                status,
            })
            .await?;

        info!(
            "Notice created: id={}, status={}, has_attachment={}",
            notice.id,
            notice.status,
            !notice.attachment_path.is_empty()
        );

        Ok(notice.into())
    }

    /// Publish every due notice, then list notices newest first.
    ///
    /// An unknown status filter matches nothing.
    pub async fn list_notices(&self, status: Option<&str>) -> Result<Vec<NoticeResponseDto>> {
        let published = self.repository.publish_due(Utc::now()).await?;
        if published > 0 {
            info!("Publish sweep: {} notice(s) published", published);
        }

        let filter = match status.filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<NoticeStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    debug!("Unknown status filter '{}', returning no notices", raw);
                    return Ok(Vec::new());
                }
            },
        };

        let notices = self.repository.list(filter).await?;
        debug!("Listed {} notice(s)", notices.len());

        Ok(notices.into_iter().map(|n| n.into()).collect())
    }

    pub async fn get_notice(&self, id: &str) -> Result<NoticeResponseDto> {
        let id = parse_notice_id(id)?;

        self.repository
            .find_by_id(id)
            .await?
            .map(|n| n.into())
            .ok_or_else(not_found)
    }

    /// Replace all fields of a notice and move it back to Unpublished.
    ///
    /// Required fields are always validated here, including for Drafts. A new
    /// upload replaces the attachment; without one the attachment is kept. An
    /// omitted position keeps the stored one, an empty one clears it.
    pub async fn update_notice(
        &self,
        id: &str,
        fields: NoticeFieldsDto,
        upload: Option<NoticeUploadDto>,
    ) -> Result<NoticeResponseDto> {
        let id = parse_notice_id(id)?;
        let fields = trim_publish_date(fields);
        validate_required(&fields)?;

        let publish_date = parse_publish_date(&fields.publish_date)?;
        let attachment = self.store_upload(upload).await?;

        let notice = self
            .repository
            .update(
                id,
                UpdateNotice {
                    target: fields.target,
                    title: fields.title,
                    employee_id: fields.employee_id,
                    employee_name: fields.employee_name,
                    position: fields.position,
                    notice_type: fields.notice_type,
                    publish_date,
                    notice_body: fields.notice_body,
                    attachment,
                    status: NoticeStatus::Unpublished,
                },
            )
            .await?
            .ok_or_else(not_found)?;

        info!("Notice updated: id={}", notice.id);

        Ok(notice.into())
    }

    /// Set a notice to Published or Unpublished
    pub async fn set_status(&self, id: &str, status: Option<&str>) -> Result<NoticeResponseDto> {
        let status = status
            .and_then(|s| s.parse::<NoticeStatus>().ok())
            .filter(NoticeStatus::is_manually_settable)
            .ok_or_else(|| AppError::validation("Invalid status value"))?;
        let id = parse_notice_id(id)?;

        let notice = self
            .repository
            .update_status(id, status)
            .await?
            .ok_or_else(not_found)?;

        info!("Notice status changed: id={}, status={}", notice.id, status);

        Ok(notice.into())
    }
}
