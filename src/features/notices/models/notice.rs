use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Notice lifecycle status matching the `notice_status` database enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "notice_status")]
pub enum NoticeStatus {
    /// Saved with relaxed validation, never picked up by the publish sweep
    Draft,
    /// Waiting for its publish date
    #[default]
    Unpublished,
    Published,
}

impl NoticeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeStatus::Draft => "Draft",
            NoticeStatus::Unpublished => "Unpublished",
            NoticeStatus::Published => "Published",
        }
    }

    /// Statuses a client may set directly through the status endpoint
    pub fn is_manually_settable(&self) -> bool {
        matches!(self, NoticeStatus::Unpublished | NoticeStatus::Published)
    }
}

impl std::fmt::Display for NoticeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoticeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(NoticeStatus::Draft),
            "Unpublished" => Ok(NoticeStatus::Unpublished),
            "Published" => Ok(NoticeStatus::Published),
            other => Err(format!("Unknown notice status '{}'", other)),
        }
    }
}

/// Database model for notice
#[derive(Debug, Clone, FromRow)]
pub struct Notice {
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

/// Stored attachment reference; name and path are always written together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name as uploaded
    pub name: String,
    /// Public path the stored file is served from
    pub path: String,
}

/// Data for inserting a new notice
#[derive(Debug, Clone)]
pub struct CreateNotice {
    pub target: String,
    pub title: String,
    pub employee_id: String,
    pub employee_name: String,
    pub position: Option<String>,
    pub notice_type: String,
    pub publish_date: Option<DateTime<Utc>>,
    pub notice_body: String,
    pub attachment: Option<Attachment>,
    pub status: NoticeStatus,
}

/// Full field replacement for an existing notice.
///
/// `attachment: None` leaves the stored attachment untouched, as does
/// `position: None`. An empty position clears the stored one.
#[derive(Debug, Clone)]
pub struct UpdateNotice {
    pub target: String,
    pub title: String,
    pub employee_id: String,
    pub employee_name: String,
    pub position: Option<String>,
    pub notice_type: String,
    pub publish_date: Option<DateTime<Utc>>,
    pub notice_body: String,
    pub attachment: Option<Attachment>,
    pub status: NoticeStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        for status in [
            NoticeStatus::Draft,
            NoticeStatus::Unpublished,
            NoticeStatus::Published,
        ] {
            assert_eq!(status.to_string().parse::<NoticeStatus>(), Ok(status));
        }
        assert!("published".parse::<NoticeStatus>().is_err());
        assert!("".parse::<NoticeStatus>().is_err());
    }

    #[test]
    fn test_status_defaults_to_unpublished() {
        assert_eq!(NoticeStatus::default(), NoticeStatus::Unpublished);
    }

    #[test]
    fn test_manually_settable_statuses() {
        assert!(NoticeStatus::Published.is_manually_settable());
        assert!(NoticeStatus::Unpublished.is_manually_settable());
        assert!(!NoticeStatus::Draft.is_manually_settable());
    }

    #[test]
    fn test_status_serializes_as_variant_name() {
        assert_eq!(
            serde_json::to_string(&NoticeStatus::Unpublished).unwrap(),
            "\"Unpublished\""
        );
    }
}
