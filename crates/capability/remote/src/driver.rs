//! 外部库驱动接口
//!
//! - RemoteDriver：按连接串建立一次性会话（每个请求独立建池，不跨请求复用）
//! - RemoteSession：会话内可执行的固定语句集合，调用方必须在所有路径上调用 `close`

use crate::connection::ConnectionString;
use crate::error::RemoteError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const USERS_TABLE: &str = "users";
pub const ACTIVE_TABLE: &str = "Active";
pub const USER_LIMIT_TABLE: &str = "UserLimit";
pub const CATEGORIES_TABLE: &str = "categories";

/// 外部库中的应用用户行。
///
/// `password` 为 bcrypt 哈希；序列化结构与客户站点的 `users` 表一致。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 外部库会话。
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// 执行 `SELECT 1`。
    async fn ping(&self) -> Result<(), RemoteError>;

    /// 读取 Active 表首行的 status。
    async fn fetch_active_status(&self) -> Result<Option<bool>, RemoteError>;

    /// 写入 status，返回写入后的值（无行时返回 None）。
    /// Active 表是否已有行（不论 status 是否为 NULL）。
    async fn active_status_exists(&self) -> Result<bool, RemoteError>;

    async fn store_active_status(&self, status: bool) -> Result<Option<bool>, RemoteError>;

    async fn insert_active_status(&self, id: &str, status: bool) -> Result<(), RemoteError>;

    async fn user_exists(&self, email: &str) -> Result<bool, RemoteError>;

    async fn insert_user(&self, user: &RemoteUser) -> Result<(), RemoteError>;

    async fn user_limit_exists(&self) -> Result<bool, RemoteError>;

    async fn insert_user_limit(&self, id: &str, max_role: i32) -> Result<(), RemoteError>;

    async fn category_exists(&self, name: &str) -> Result<bool, RemoteError>;

    async fn insert_category(&self, id: &str, name: &str) -> Result<(), RemoteError>;

    /// 释放连接并关闭连接池；关闭错误被忽略。
    async fn close(&self);
}

/// 外部库驱动（Connection Factory）。
#[async_trait]
pub trait RemoteDriver: Send + Sync {
    async fn connect(&self, target: &ConnectionString)
    -> Result<Box<dyn RemoteSession>, RemoteError>;
}
