use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::features::{health, notices, notices::NoticeService};
use crate::modules::storage::LocalFileStore;

/// API routes plus static serving of stored attachments
pub fn build_router(
    notice_service: Arc<NoticeService>,
    file_store: &LocalFileStore,
    max_body_size: usize,
) -> Router {
    Router::new()
        .merge(notices::routes(notice_service, max_body_size))
        .merge(health::routes())
        .nest_service(
            file_store.public_prefix(),
            ServeDir::new(file_store.base_path()),
        )
}
