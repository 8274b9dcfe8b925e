mod notice_handler;

pub use notice_handler::*;
