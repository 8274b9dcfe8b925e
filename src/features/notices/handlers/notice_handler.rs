use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::notices::dtos::{
    CreateNoticeFormDto, ListNoticesQuery, NoticeFieldsDto, NoticeResponseDto, NoticeUploadDto,
    UpdateNoticeFormDto, UpdateNoticeStatusDto,
};
use crate::features::notices::services::NoticeService;
use crate::shared::constants::ATTACHMENT_FIELD;
use crate::shared::types::{ApiResponse, Meta};

/// Parsed notice form: text fields, the optional status hint and the upload
#[derive(Debug, Default)]
struct NoticeForm {
    fields: NoticeFieldsDto,
    status: Option<String>,
    attachment: Option<NoticeUploadDto>,
}

fn multipart_error(e: MultipartError) -> AppError {
    debug!("Failed to read multipart data: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    }
}

async fn read_notice_form(mut multipart: Multipart) -> Result<NoticeForm> {
    let mut form = NoticeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == ATTACHMENT_FIELD {
            // Browsers send an empty, unnamed part when no file was picked
            let file_name = field.file_name().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            if !file_name.is_empty() {
                form.attachment = Some(NoticeUploadDto {
                    file_name,
                    data: data.to_vec(),
                });
            }
            continue;
        }

        let text = field.text().await.map_err(multipart_error)?;
        let fields = &mut form.fields;
        match field_name.as_str() {
            "target" => fields.target = text,
            "title" => fields.title = text,
            "employeeId" => fields.employee_id = text,
            "employeeName" => fields.employee_name = text,
            "position" => fields.position = Some(text),
            "noticeType" => fields.notice_type = text,
            "publishDate" => fields.publish_date = text,
            "noticeBody" => fields.notice_body = text,
            "status" => form.status = Some(text),
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    Ok(form)
}

/// Create a notice
///
/// Accepts multipart/form-data. Send `status=Draft` to save a draft without
/// the required fields; an optional `attachment` file is stored and linked.
#[utoipa::path(
    post,
    path = "/api/notices",
    tag = "notices",
    request_body(
        content = CreateNoticeFormDto,
        content_type = "multipart/form-data",
        description = "Notice fields with an optional attachment",
    ),
    responses(
        (status = 201, description = "Notice created", body = ApiResponse<NoticeResponseDto>),
        (status = 400, description = "Missing required fields"),
        (status = 413, description = "Attachment too large"),
        (status = 500, description = "Failed to create notice")
    )
)]
pub async fn create_notice(
    State(service): State<Arc<NoticeService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<NoticeResponseDto>>)> {
    let form = read_notice_form(multipart).await?;

    let notice = service
        .create_notice(form.fields, form.status.as_deref(), form.attachment)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(notice), None, None)),
    ))
}

/// List notices
///
/// Publishes every Unpublished notice whose publish date has passed, then
/// returns notices newest first.
#[utoipa::path(
    get,
    path = "/api/notices",
    tag = "notices",
    params(ListNoticesQuery),
    responses(
        (status = 200, description = "List of notices", body = ApiResponse<Vec<NoticeResponseDto>>),
        (status = 500, description = "Failed to fetch notices")
    )
)]
pub async fn list_notices(
    State(service): State<Arc<NoticeService>>,
    Query(query): Query<ListNoticesQuery>,
) -> Result<Json<ApiResponse<Vec<NoticeResponseDto>>>> {
    let notices = service.list_notices(query.status.as_deref()).await?;
    let total = notices.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(notices),
        None,
        Some(Meta { total }),
    )))
}

/// Get notice by ID
#[utoipa::path(
    get,
    path = "/api/notices/{id}",
    tag = "notices",
    params(
        ("id" = String, Path, description = "Notice ID")
    ),
    responses(
        (status = 200, description = "Notice found", body = ApiResponse<NoticeResponseDto>),
        (status = 400, description = "Malformed notice ID"),
        (status = 404, description = "Notice not found")
    )
)]
pub async fn get_notice(
    State(service): State<Arc<NoticeService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NoticeResponseDto>>> {
    let notice = service.get_notice(&id).await?;
    Ok(Json(ApiResponse::success(Some(notice), None, None)))
}

/// Update a notice
///
/// Replaces every field and moves the notice back to Unpublished. A new
/// `attachment` replaces the current one.
#[utoipa::path(
    put,
    path = "/api/notices/{id}",
    tag = "notices",
    params(
        ("id" = String, Path, description = "Notice ID")
    ),
    request_body(
        content = UpdateNoticeFormDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Notice updated", body = ApiResponse<NoticeResponseDto>),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Notice not found")
    )
)]
pub async fn update_notice(
    State(service): State<Arc<NoticeService>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<NoticeResponseDto>>> {
    let form = read_notice_form(multipart).await?;

    let notice = service
        .update_notice(&id, form.fields, form.attachment)
        .await?;

    Ok(Json(ApiResponse::success(Some(notice), None, None)))
}

/// Publish or unpublish a notice
#[utoipa::path(
    patch,
    path = "/api/notices/{id}/status",
    tag = "notices",
    params(
        ("id" = String, Path, description = "Notice ID")
    ),
    request_body = UpdateNoticeStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<NoticeResponseDto>),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Notice not found")
    )
)]
pub async fn update_notice_status(
    State(service): State<Arc<NoticeService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateNoticeStatusDto>,
) -> Result<Json<ApiResponse<NoticeResponseDto>>> {
    let notice = service.set_status(&id, dto.status.as_deref()).await?;
    Ok(Json(ApiResponse::success(Some(notice), None, None)))
}
