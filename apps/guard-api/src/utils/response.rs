//! HTTP 响应辅助函数和 DTO 转换
//!
//! 两类错误体：
//! - 外部库与公告端点：`{message}` / `{error}`（客户站点前端已依赖此结构）
//! - 子账户端点：ApiResponse 封装，错误码形如 `INVALID.REQUEST`

use api_contract::{
    ApiResponse, ChildDto, ErrorResponse, MessageResponse, PageInfoDto, RemoteUserDto, UpdateDto,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use domain::PageInfo;
use guard_remote::RemoteUser;
use guard_storage::{ChildRecord, StorageError, UpdateRecord};

/// `{message}` 响应
pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(MessageResponse::new(message))).into_response()
}

/// `{message, error}` 响应
pub fn message_error_response(
    status: StatusCode,
    message: impl Into<String>,
    error: impl Into<String>,
) -> Response {
    (status, Json(MessageResponse::with_error(message, error))).into_response()
}

/// `{error}` 响应
pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(error))).into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error(message: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", message.into())),
    )
        .into_response()
}

/// 内部错误响应
pub fn internal_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message.into())),
    )
        .into_response()
}

/// 存储错误响应
pub fn storage_error(err: StorageError) -> Response {
    tracing::error!(error = %err, "storage operation failed");
    internal_error(err.to_string())
}

pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ChildRecord 转 ChildDto（不含口令哈希）
pub fn child_to_dto(record: ChildRecord) -> ChildDto {
    ChildDto {
        id: record.child_id,
        name: record.name,
        email: record.email,
        phone: record.phone,
        domain: record.domain,
        total_amt: record.total_amt,
        status: record.status,
        join_date: format_timestamp(record.join_date),
        database_url: record.database_url,
        parent_id: record.parent_id,
        created_at: format_timestamp(record.created_at),
        updated_at: format_timestamp(record.updated_at),
    }
}

/// UpdateRecord 转 UpdateDto
pub fn update_to_dto(record: UpdateRecord) -> UpdateDto {
    UpdateDto {
        id: record.update_id,
        title: record.title,
        show: record.show,
        link: record.link,
        created_at: format_timestamp(record.created_at),
        updated_at: format_timestamp(record.updated_at),
    }
}

/// RemoteUser 转 RemoteUserDto
pub fn remote_user_to_dto(user: RemoteUser) -> RemoteUserDto {
    RemoteUserDto {
        id: user.id,
        email: user.email,
        name: user.name,
        password: user.password,
        role: user.role,
        created_at: format_timestamp(user.created_at),
        updated_at: format_timestamp(user.updated_at),
    }
}

pub fn page_info_to_dto(info: PageInfo) -> PageInfoDto {
    PageInfoDto {
        current_page: info.current_page,
        page_size: info.page_size,
        total_count: info.total_count,
        total_pages: info.total_pages,
    }
}
