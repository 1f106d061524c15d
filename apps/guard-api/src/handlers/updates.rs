//! 版本公告 handlers
//!
//! - POST /api/update - 创建公告（201）
//! - GET /api/update - 全部公告（按创建时间倒序）
//! - PUT /api/update/:id - 修改公告
//! - DELETE /api/update/:id - 删除公告
//! - GET /api/check-update - 仅 show = true 的公告
//!
//! 响应体为裸 JSON，错误为 `{error}`。

use crate::AppState;
use crate::utils::{error_response, message_response, normalize_optional, update_to_dto};
use api_contract::{CreateUpdateRequest, UpdateDto, UpdateUpdateRequest};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use guard_storage::{UpdatePatch, UpdateRecord};
use serde::de::DeserializeOwned;
use uuid::Uuid;

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, Response> {
    serde_json::from_slice(body)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid request body"))
}

/// 创建公告
pub async fn create_update(State(state): State<AppState>, body: Bytes) -> Response {
    let req: CreateUpdateRequest = match parse_body(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let title = match req.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => return error_response(StatusCode::BAD_REQUEST, "Title is required"),
    };
    let now = Utc::now();
    let record = UpdateRecord {
        update_id: Uuid::new_v4().to_string(),
        title,
        show: req.show,
        link: req.link.filter(|link| !link.trim().is_empty()),
        created_at: now,
        updated_at: now,
    };
    match state.update_store.create_update(record).await {
        Ok(item) => (StatusCode::CREATED, Json(update_to_dto(item))).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to create update");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create update")
        }
    }
}

/// 列出全部公告
pub async fn list_updates(State(state): State<AppState>) -> Response {
    list(&state, false).await
}

/// 列出对外可见的公告
pub async fn check_update(State(state): State<AppState>) -> Response {
    list(&state, true).await
}

async fn list(state: &AppState, visible_only: bool) -> Response {
    match state.update_store.list_updates(visible_only).await {
        Ok(items) => {
            let data: Vec<UpdateDto> = items.into_iter().map(update_to_dto).collect();
            (StatusCode::OK, Json(data)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch updates");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch updates")
        }
    }
}

/// 修改公告
pub async fn modify_update(
    State(state): State<AppState>,
    Path(update_id): Path<String>,
    body: Bytes,
) -> Response {
    let req: UpdateUpdateRequest = match parse_body(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let title = match normalize_optional(req.title, "title") {
        Ok(title) => title,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Title is required"),
    };
    let patch = UpdatePatch {
        title,
        show: req.show,
        link: req.link,
    };
    match state.update_store.update_update(&update_id, patch).await {
        Ok(Some(item)) => (StatusCode::OK, Json(update_to_dto(item))).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Update not found"),
        Err(err) => {
            tracing::error!(error = %err, "failed to update update");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update update")
        }
    }
}

/// 删除公告
pub async fn delete_update(
    State(state): State<AppState>,
    Path(update_id): Path<String>,
) -> Response {
    match state.update_store.delete_update(&update_id).await {
        Ok(true) => message_response(StatusCode::OK, "Update deleted successfully"),
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Update not found"),
        Err(err) => {
            tracing::error!(error = %err, "failed to delete update");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete update")
        }
    }
}
