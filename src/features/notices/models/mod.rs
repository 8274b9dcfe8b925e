mod notice;

pub use notice::{Attachment, CreateNotice, Notice, NoticeStatus, UpdateNotice};
