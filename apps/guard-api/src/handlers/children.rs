//! 子账户 handlers
//!
//! - POST /api/children - 创建子账户
//! - GET /api/children?parentId&page&pageSize - 分页列表
//! - GET /api/children/search?parentId&q - 搜索
//! - GET /api/children/dashboard?parentId - 看板汇总
//! - GET /api/children/:child_id?parentId - 详情
//! - PATCH /api/children/:child_id - 字段级更新 `{field, value}`
//! - DELETE /api/children/:child_id - 删除
//! - POST /api/children/:child_id/provision - 在子账户的外部库中开通管理员

use crate::AppState;
use crate::handlers::register::provision_response;
use crate::utils::response::{
    bad_request_error, internal_error, not_found_error, storage_error,
};
use crate::utils::{
    child_to_dto, field_value, normalize_required, page_info_to_dto, strict_json,
};
use api_contract::{
    ApiResponse, ChildDto, ChildFieldUpdateRequest, ChildPageDto, CreateChildRequest,
    DashboardDto, ProvisionChildRequest, StatusDataDto,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use domain::{ChildFieldUpdate, PageRequest, parse_join_date};
use guard_auth::{PasswordPolicy, hash_password_blocking};
use guard_remote::{ConnectionString, RegistrationRequest};
use guard_storage::ChildRecord;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChildrenQuery {
    parent_id: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchChildrenQuery {
    parent_id: Option<String>,
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentQuery {
    parent_id: Option<String>,
}

/// 创建子账户
pub async fn create_child(State(state): State<AppState>, body: Bytes) -> Response {
    let req: CreateChildRequest = match strict_json(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let record = match validate_new_child(req).await {
        Ok(record) => record,
        Err(response) => return response,
    };
    match state.child_store.create_child(record).await {
        Ok(item) => {
            tracing::info!(child_id = %item.child_id, parent_id = %item.parent_id, "child created");
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(child_to_dto(item))),
            )
                .into_response()
        }
        Err(err) => storage_error(err),
    }
}

async fn validate_new_child(req: CreateChildRequest) -> Result<ChildRecord, Response> {
    let name = normalize_required(req.name, "name")?;
    let email = normalize_required(req.email, "email")?;
    let phone = normalize_required(req.phone, "phone")?;
    let password = req.password.unwrap_or_default();
    let database_url = normalize_required(req.database_url, "databaseUrl")?;
    let parent_id = normalize_required(req.parent_id, "parentId")?;
    let join_date = normalize_required(req.join_date, "joinDate")?;
    if password.is_empty() {
        return Err(bad_request_error("password required"));
    }
    if !email.contains('@') {
        return Err(bad_request_error("Invalid email"));
    }
    if phone.chars().count() < 10 {
        return Err(bad_request_error("Invalid phone number"));
    }
    let total_amt = req.total_amt.unwrap_or(0.0);
    if !total_amt.is_finite() || total_amt < 0.0 {
        return Err(bad_request_error("Invalid total amount"));
    }
    PasswordPolicy::default()
        .check(&password)
        .map_err(|err| bad_request_error(err.to_string()))?;
    let join_date =
        parse_join_date(&join_date).ok_or_else(|| bad_request_error("Invalid join date"))?;
    let database_url = ConnectionString::parse(&database_url)
        .map_err(|err| bad_request_error(err.to_string()))?
        .expose()
        .to_string();
    let password_hash = hash_password_blocking(password)
        .await
        .map_err(|err| internal_error(err.to_string()))?;

    let now = Utc::now();
    Ok(ChildRecord {
        child_id: Uuid::new_v4().to_string(),
        parent_id,
        name: name.to_lowercase(),
        email: email.to_lowercase(),
        phone,
        domain: req.domain.unwrap_or_default().trim().to_lowercase(),
        total_amt,
        password_hash,
        status: true,
        join_date,
        database_url,
        created_at: now,
        updated_at: now,
    })
}

/// 分页列出子账户
pub async fn list_children(
    State(state): State<AppState>,
    Query(query): Query<ListChildrenQuery>,
) -> Response {
    let parent_id = match normalize_required(query.parent_id, "parentId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let page = PageRequest::new(query.page, query.page_size);
    match state.child_store.list_children(&parent_id, page).await {
        Ok(result) => {
            let page_info = page_info_to_dto(page.page_info(result.total_count));
            let data = ChildPageDto {
                children: result.children.into_iter().map(child_to_dto).collect(),
                page_info,
                total_children: result.total_count,
            };
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 搜索子账户
pub async fn search_children(
    State(state): State<AppState>,
    Query(query): Query<SearchChildrenQuery>,
) -> Response {
    let parent_id = match normalize_required(query.parent_id, "parentId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let search = query.q.unwrap_or_default();
    match state.child_store.search_children(&parent_id, &search).await {
        Ok(items) => {
            let data: Vec<ChildDto> = items.into_iter().map(child_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 看板汇总
pub async fn children_dashboard(
    State(state): State<AppState>,
    Query(query): Query<ParentQuery>,
) -> Response {
    let parent_id = match normalize_required(query.parent_id, "parentId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.child_store.summarize_children(&parent_id).await {
        Ok(summary) => {
            let data = DashboardDto {
                user_status_data: vec![
                    StatusDataDto {
                        name: "Active".to_string(),
                        value: summary.active,
                    },
                    StatusDataDto {
                        name: "Inactive".to_string(),
                        value: summary.inactive(),
                    },
                ],
                total_children: summary.total,
                active_children: summary.active,
                inactive_children: summary.inactive(),
                total_amount: summary.total_amount,
            };
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 子账户详情
pub async fn get_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    Query(query): Query<ParentQuery>,
) -> Response {
    let parent_id = match normalize_required(query.parent_id, "parentId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.child_store.find_child(&parent_id, &child_id).await {
        Ok(Some(item)) => {
            (StatusCode::OK, Json(ApiResponse::success(child_to_dto(item)))).into_response()
        }
        Ok(None) => not_found_error("Child not found"),
        Err(err) => storage_error(err),
    }
}

/// 字段级更新
pub async fn update_child_field(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    body: Bytes,
) -> Response {
    let req: ChildFieldUpdateRequest = match strict_json(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    if req.field.trim().is_empty() {
        return bad_request_error("field required");
    }
    let Some(value) = field_value(req.value) else {
        return bad_request_error("value required");
    };
    let update = match ChildFieldUpdate::parse(&req.field, value) {
        Ok(update) => update,
        Err(err) => return bad_request_error(err.to_string()),
    };
    let field = update.field();
    match state.child_store.update_child_field(&child_id, update).await {
        Ok(Some(item)) => {
            tracing::info!(child_id = %item.child_id, field = field.as_str(), "child field updated");
            (StatusCode::OK, Json(ApiResponse::success(child_to_dto(item)))).into_response()
        }
        Ok(None) => not_found_error("Child not found with the given id"),
        Err(err) => storage_error(err),
    }
}

/// 删除子账户，返回被删除的记录
pub async fn delete_child(State(state): State<AppState>, Path(child_id): Path<String>) -> Response {
    match state.child_store.delete_child(&child_id).await {
        Ok(Some(item)) => {
            tracing::info!(child_id = %item.child_id, "child deleted");
            (StatusCode::OK, Json(ApiResponse::success(child_to_dto(item)))).into_response()
        }
        Ok(None) => not_found_error("Child not found with the given id"),
        Err(err) => storage_error(err),
    }
}

/// 使用子账户登记的连接串执行注册与基线初始化
pub async fn provision_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    body: Bytes,
) -> Response {
    let req: ProvisionChildRequest = match strict_json(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let child = match state.child_store.find_child_by_id(&child_id).await {
        Ok(Some(child)) => child,
        Ok(None) => return not_found_error("Child not found with the given id"),
        Err(err) => return storage_error(err),
    };
    let request = RegistrationRequest {
        name: req.name,
        email: req.email,
        password: req.password,
        database_url: Some(child.database_url),
        role: req.role,
    };
    provision_response(state.provisioner.register_and_provision(request).await)
}
