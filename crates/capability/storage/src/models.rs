//! 数据模型
//!
//! - 子账户：ChildRecord, ChildPage, ChildSummary
//! - 版本公告：UpdateRecord, UpdatePatch

use chrono::{DateTime, Utc};

/// 子账户记录（一个客户站点）。
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRecord {
    pub child_id: String,
    pub parent_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub domain: String,
    pub total_amt: f64,
    /// bcrypt 哈希，不对外返回
    pub password_hash: String,
    pub status: bool,
    pub join_date: DateTime<Utc>,
    /// 客户站点自有数据库的连接串
    pub database_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 子账户分页结果。
#[derive(Debug, Clone)]
pub struct ChildPage {
    pub children: Vec<ChildRecord>,
    pub total_count: u64,
}

/// 看板汇总。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChildSummary {
    pub total: u64,
    pub active: u64,
    pub total_amount: f64,
}

impl ChildSummary {
    pub fn inactive(&self) -> u64 {
        self.total.saturating_sub(self.active)
    }
}

/// 版本公告记录。
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecord {
    pub update_id: String,
    pub title: String,
    pub show: bool,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 版本公告更新（None 表示保持不变）。
#[derive(Debug, Clone, Default)]
pub struct UpdatePatch {
    pub title: Option<String>,
    pub show: Option<bool>,
    pub link: Option<String>,
}
