mod notice_dto;

pub use notice_dto::*;
