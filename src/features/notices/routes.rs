use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use crate::features::notices::handlers;
use crate::features::notices::services::NoticeService;
use crate::shared::constants::MULTIPART_OVERHEAD_BYTES;

/// Create routes for the notices feature
pub fn routes(service: Arc<NoticeService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/notices",
            get(handlers::list_notices).post(handlers::create_notice),
        )
        .route(
            "/api/notices/{id}",
            get(handlers::get_notice).put(handlers::update_notice),
        )
        .route(
            "/api/notices/{id}/status",
            patch(handlers::update_notice_status),
        )
        .layer(DefaultBodyLimit::max(max_body_size + MULTIPART_OVERHEAD_BYTES))
        .with_state(service)
}
