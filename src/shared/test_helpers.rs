use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::Mutex;
use uuid::Uuid;

use crate::core::config::UploadConfig;
use crate::core::error::{AppError, Result};
use crate::features::notices::dtos::NoticeFieldsDto;
use crate::features::notices::models::{CreateNotice, Notice, NoticeStatus, UpdateNotice};
use crate::features::notices::repositories::NoticeRepository;
use crate::modules::storage::LocalFileStore;

/// Notice repository kept in memory, in insertion order
#[derive(Default)]
pub struct InMemoryNoticeRepository {
    notices: Mutex<Vec<Notice>>,
}

impl InMemoryNoticeRepository {
    /// Insert a notice directly, bypassing the service, and return its id
    pub fn seed(&self, notice: CreateNotice) -> Uuid {
        let notice = Self::build(notice);
        let id = notice.id;
        self.notices.lock().unwrap().push(notice);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    fn build(notice: CreateNotice) -> Notice {
        let now = Utc::now();
        let (attachment_name, attachment_path) = notice
            .attachment
            .map(|a| (a.name, a.path))
            .unwrap_or_default();

        Notice {
            id: Uuid::new_v4(),
            target: notice.target,
            title: notice.title,
            employee_id: notice.employee_id,
            employee_name: notice.employee_name,
            position: notice.position,
            notice_type: notice.notice_type,
            publish_date: notice.publish_date,
            notice_body: notice.notice_body,
            attachment_name,
            attachment_path,
            status: notice.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn modify<F>(&self, id: Uuid, apply: F) -> Option<Notice>
    where
        F: FnOnce(&mut Notice),
    {
        let mut notices = self.notices.lock().unwrap();
        let notice = notices.iter_mut().find(|n| n.id == id)?;
        apply(notice);
        notice.updated_at = Utc::now();
        Some(notice.clone())
    }
}

#[async_trait]
impl NoticeRepository for InMemoryNoticeRepository {
    async fn insert(&self, notice: CreateNotice) -> Result<Notice> {
        let notice = Self::build(notice);
        self.notices.lock().unwrap().push(notice.clone());
        Ok(notice)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>> {
        Ok(self.get(id))
    }

    async fn list(&self, status: Option<NoticeStatus>) -> Result<Vec<Notice>> {
        let mut notices: Vec<Notice> = self
            .notices
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|n| status.map_or(true, |s| n.status == s))
            .cloned()
            .collect();
        // Stable sort keeps later inserts first when timestamps tie
        notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notices)
    }

    async fn update(&self, id: Uuid, changes: UpdateNotice) -> Result<Option<Notice>> {
        Ok(self.modify(id, |n| {
            n.target = changes.target;
            n.title = changes.title;
            n.employee_id = changes.employee_id;
            n.employee_name = changes.employee_name;
            if let Some(position) = changes.position {
                n.position = Some(position).filter(|p| !p.is_empty());
            }
            n.notice_type = changes.notice_type;
            n.publish_date = changes.publish_date;
            n.notice_body = changes.notice_body;
            n.status = changes.status;
            if let Some(attachment) = changes.attachment {
                n.attachment_name = attachment.name;
                n.attachment_path = attachment.path;
            }
        }))
    }

    async fn update_status(&self, id: Uuid, status: NoticeStatus) -> Result<Option<Notice>> {
        Ok(self.modify(id, |n| n.status = status))
    }

    async fn publish_due(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut notices = self.notices.lock().unwrap();
        let mut count = 0;
        for notice in notices.iter_mut().filter(|n| {
            n.status == NoticeStatus::Unpublished && n.publish_date.is_some_and(|d| d <= now)
        }) {
            notice.status = NoticeStatus::Published;
            notice.updated_at = now;
            count += 1;
        }
        Ok(count)
    }
}

/// Repository whose every call fails like an unreachable database
pub struct FailingNoticeRepository;

fn unavailable() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl NoticeRepository for FailingNoticeRepository {
    async fn insert(&self, _notice: CreateNotice) -> Result<Notice> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Notice>> {
        Err(unavailable())
    }

    async fn list(&self, _status: Option<NoticeStatus>) -> Result<Vec<Notice>> {
        Err(unavailable())
    }

    async fn update(&self, _id: Uuid, _changes: UpdateNotice) -> Result<Option<Notice>> {
        Err(unavailable())
    }

    async fn update_status(&self, _id: Uuid, _status: NoticeStatus) -> Result<Option<Notice>> {
        Err(unavailable())
    }

    async fn publish_due(&self, _now: DateTime<Utc>) -> Result<u64> {
        Err(unavailable())
    }
}

/// File store rooted in a fresh temporary directory; keep the guard alive
pub async fn test_file_store() -> (LocalFileStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = LocalFileStore::new(&UploadConfig {
        dir: dir.path().join("uploads").to_string_lossy().into_owned(),
        public_prefix: "/uploads".to_string(),
    })
    .await
    .expect("Failed to create file store");
    (store, dir)
}

/// A complete set of notice fields
pub fn valid_fields() -> NoticeFieldsDto {
    NoticeFieldsDto {
        target: "All Department".to_string(),
        title: Sentence(3..6).fake(),
        employee_id: format!("EMP-{}", (1000..9999).fake::<u32>()),
        employee_name: Name().fake(),
        position: Some(JobTitle().fake()),
        notice_type: Word().fake(),
        publish_date: "2030-06-01".to_string(),
        notice_body: Paragraph(1..3).fake(),
    }
}

/// Every field empty, only acceptable for drafts
pub fn draft_fields() -> NoticeFieldsDto {
    NoticeFieldsDto::default()
}

/// Notice row with the given status and publish date
pub fn due_notice(status: NoticeStatus, publish_date: Option<DateTime<Utc>>) -> CreateNotice {
    CreateNotice {
        target: "Finance".to_string(),
        title: Sentence(2..4).fake(),
        employee_id: "EMP-1001".to_string(),
        employee_name: Name().fake(),
        position: None,
        notice_type: "Announcement".to_string(),
        publish_date,
        notice_body: Paragraph(1..2).fake(),
        attachment: None,
        status,
    }
}
