//! 稳定的 DTO 与 API 响应契约。
//!
//! 外部库相关端点（check-db、check-api-status、register）与版本公告端点
//! 沿用客户站点已经在用的响应体；子账户端点使用 `ApiResponse` 封装。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

// ============================================
// 外部库端点
// ============================================

/// 只携带连接串的请求体（check-db、check-api-status）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseUrlRequest {
    #[serde(default)]
    pub database_url: Option<String>,
}

/// 连通性探测响应体。
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckDbResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Active 状态响应体。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiStatusResponse {
    pub status: bool,
}

/// `{message, error?}` 形式的响应体。
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// `{error}` 形式的响应体。
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 外部库注册请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub database_url: Option<String>,
    pub role: Option<String>,
}

/// 外部库中创建的用户。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 注册成功响应体。
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: RemoteUserDto,
}

// ============================================
// 版本公告
// ============================================

/// 公告创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub show: bool,
    pub link: Option<String>,
}

/// 公告更新请求体（缺省字段保持不变）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUpdateRequest {
    pub title: Option<String>,
    pub show: Option<bool>,
    pub link: Option<String>,
}

/// 公告返回结构。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDto {
    pub id: String,
    pub title: String,
    pub show: bool,
    pub link: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

// ============================================
// 子账户
// ============================================

/// 子账户创建请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub domain: Option<String>,
    pub total_amt: Option<f64>,
    pub password: Option<String>,
    pub join_date: Option<String>,
    pub database_url: Option<String>,
    pub parent_id: Option<String>,
}

/// 子账户返回结构（不含口令）。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub domain: String,
    pub total_amt: f64,
    pub status: bool,
    pub join_date: String,
    pub database_url: String,
    pub parent_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 分页信息。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoDto {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

/// 子账户分页列表。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildPageDto {
    pub children: Vec<ChildDto>,
    pub page_info: PageInfoDto,
    pub total_children: u64,
}

/// 字段级更新请求体：`value` 可为字符串、数字或布尔值。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildFieldUpdateRequest {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

/// 状态分布项。
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusDataDto {
    pub name: String,
    pub value: u64,
}

/// 子账户看板数据。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub user_status_data: Vec<StatusDataDto>,
    pub total_children: u64,
    pub active_children: u64,
    pub inactive_children: u64,
    pub total_amount: f64,
}

/// 在子账户外部库中开通管理员账号的请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionChildRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

// ============================================
// 运维
// ============================================

/// 计数器快照。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub probes_succeeded: u64,
    pub probes_failed: u64,
    pub status_reads: u64,
    pub status_toggles: u64,
    pub registrations: u64,
    pub registration_conflicts: u64,
    pub provisioning_failures: u64,
    pub remote_connects: u64,
    pub remote_closes: u64,
}
