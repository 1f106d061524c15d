//! 存储接口 Trait 定义
//!
//! - ChildStore：子账户存储（按 parent_id 隔离）
//! - UpdateStore：版本公告存储
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{ChildPage, ChildRecord, ChildSummary, UpdatePatch, UpdateRecord};
use async_trait::async_trait;
use domain::{ChildFieldUpdate, PageRequest};

/// 子账户存储接口
#[async_trait]
pub trait ChildStore: Send + Sync {
    /// 创建子账户
    async fn create_child(&self, record: ChildRecord) -> Result<ChildRecord, StorageError>;

    /// 分页列出某个父账户下的子账户（按创建时间倒序）
    async fn list_children(
        &self,
        parent_id: &str,
        page: PageRequest,
    ) -> Result<ChildPage, StorageError>;

    /// 在 name/phone/domain/email 中做大小写不敏感的包含匹配
    async fn search_children(
        &self,
        parent_id: &str,
        query: &str,
    ) -> Result<Vec<ChildRecord>, StorageError>;

    /// 查找父账户下的指定子账户
    async fn find_child(
        &self,
        parent_id: &str,
        child_id: &str,
    ) -> Result<Option<ChildRecord>, StorageError>;

    /// 按 ID 查找子账户
    async fn find_child_by_id(&self, child_id: &str) -> Result<Option<ChildRecord>, StorageError>;

    /// 更新单个字段，返回更新后的记录
    async fn update_child_field(
        &self,
        child_id: &str,
        update: ChildFieldUpdate,
    ) -> Result<Option<ChildRecord>, StorageError>;

    /// 删除子账户，返回被删除的记录
    async fn delete_child(&self, child_id: &str) -> Result<Option<ChildRecord>, StorageError>;

    /// 看板汇总
    async fn summarize_children(&self, parent_id: &str) -> Result<ChildSummary, StorageError>;
}

/// 版本公告存储接口
#[async_trait]
pub trait UpdateStore: Send + Sync {
    async fn create_update(&self, record: UpdateRecord) -> Result<UpdateRecord, StorageError>;

    /// 按创建时间倒序列出公告；`visible_only` 时只返回 show = true 的公告
    async fn list_updates(&self, visible_only: bool) -> Result<Vec<UpdateRecord>, StorageError>;

    async fn update_update(
        &self,
        update_id: &str,
        patch: UpdatePatch,
    ) -> Result<Option<UpdateRecord>, StorageError>;

    async fn delete_update(&self, update_id: &str) -> Result<bool, StorageError>;
}
