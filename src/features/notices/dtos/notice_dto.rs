use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::notices::models::{Notice, NoticeStatus};

/// Notice fields submitted through the create and update forms.
///
/// The seven required fields default to empty strings so a missing form
/// field and an empty one are treated the same way.
#[derive(Debug, Clone, Default, Validate)]
pub struct NoticeFieldsDto {
    #[validate(length(min = 1, message = "target is required"))]
    pub target: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "employeeId is required"))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "employeeName is required"))]
    pub employee_name: String,
    pub position: Option<String>,
    #[validate(length(min = 1, message = "noticeType is required"))]
    pub notice_type: String,
    #[validate(length(min = 1, message = "publishDate is required"))]
    pub publish_date: String,
    #[validate(length(min = 1, message = "noticeBody is required"))]
    pub notice_body: String,
}

/// File uploaded alongside a notice form
#[derive(Debug, Clone)]
pub struct NoticeUploadDto {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Create notice form for OpenAPI documentation.
/// The actual handler reads axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct CreateNoticeFormDto {
    #[schema(example = "All Department")]
    pub target: Option<String>,
    pub title: Option<String>,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub position: Option<String>,
    #[schema(example = "General / Company-Wide")]
    pub notice_type: Option<String>,
    #[schema(example = "2025-01-15")]
    pub publish_date: Option<String>,
    pub notice_body: Option<String>,
    /// Send "Draft" to save without the required fields
    #[schema(example = "Draft")]
    pub status: Option<String>,
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub attachment: Option<String>,
}

/// Update notice form for OpenAPI documentation
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UpdateNoticeFormDto {
    pub target: String,
    pub title: String,
    pub employee_id: String,
    pub employee_name: String,
    pub position: Option<String>,
    pub notice_type: String,
    pub publish_date: String,
    pub notice_body: String,
    /// Replaces the current attachment when present
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub attachment: Option<String>,
}

/// Request DTO for setting a notice status
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateNoticeStatusDto {
    /// "Published" or "Unpublished"
    #[schema(example = "Published")]
    pub status: Option<String>,
}

/// Query params for listing notices
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNoticesQuery {
    /// Only return notices with this status
    pub status: Option<String>,
}

/// Response DTO for notice
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponseDto {
    pub id: Uuid,
    pub target: String,
    pub title: String,
    pub employee_id: String,
    pub employee_name: String,
    pub position: Option<String>,
    pub notice_type: String,
    pub publish_date: Option<DateTime<Utc>>,
    pub notice_body: String,
    pub attachment_name: String,
    pub attachment_path: String,
    pub status: NoticeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Notice> for NoticeResponseDto {
    fn from(n: Notice) -> Self {
        Self {
            id: n.id,
            target: n.target,
            title: n.title,
            employee_id: n.employee_id,
            employee_name: n.employee_name,
            position: n.position,
            notice_type: n.notice_type,
            publish_date: n.publish_date,
            notice_body: n.notice_body,
            attachment_name: n.attachment_name,
            attachment_path: n.attachment_path,
            status: n.status,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}
