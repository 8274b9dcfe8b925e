use utoipa::{Modify, OpenApi};

use crate::features::health::handlers as health_handlers;
use crate::features::notices::{dtos as notices_dtos, handlers as notices_handlers, models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Notices
        notices_handlers::create_notice,
        notices_handlers::list_notices,
        notices_handlers::get_notice,
        notices_handlers::update_notice,
        notices_handlers::update_notice_status,
        // Health
        health_handlers::health_check,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Notices
            models::NoticeStatus,
            notices_dtos::CreateNoticeFormDto,
            notices_dtos::UpdateNoticeFormDto,
            notices_dtos::UpdateNoticeStatusDto,
            notices_dtos::NoticeResponseDto,
            ApiResponse<notices_dtos::NoticeResponseDto>,
            ApiResponse<Vec<notices_dtos::NoticeResponseDto>>,
            // Health
            health_handlers::HealthResponseDto,
        )
    ),
    tags(
        (name = "notices", description = "Notice drafts, scheduled publishing and attachments"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Notice Board API",
        version = "0.1.0",
        description = "API documentation for the notice board",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_notice_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/notices",
            "/api/notices/{id}",
            "/api/notices/{id}/status",
            "/api/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Board".into(),
            version: "9.9.9".into(),
            description: "Internal".into(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Board");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Internal"));
    }
}
