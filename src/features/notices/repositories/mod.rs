mod notice_repository;

pub use notice_repository::{NoticeRepository, PgNoticeRepository};
