//! 子账户内存存储实现
//!
//! 功能：
//! - 子账户 CRUD 与字段级更新
//! - 按 parent_id 过滤
//! - 分页、搜索、看板汇总

use crate::error::StorageError;
use crate::models::{ChildPage, ChildRecord, ChildSummary};
use crate::traits::ChildStore;
use crate::validation::{contains_ignore_case, ensure_parent};
use chrono::Utc;
use domain::{ChildFieldUpdate, PageRequest};
use std::sync::RwLock;

/// 子账户内存存储
///
/// 使用 RwLock + Vec 保存插入顺序，创建时间相同时后插入的排在前面。
#[derive(Default)]
pub struct InMemoryChildStore {
    children: RwLock<Vec<ChildRecord>>,
}

impl InMemoryChildStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn for_parent(&self, parent_id: &str) -> Vec<ChildRecord> {
        let mut items: Vec<ChildRecord> = self
            .children
            .read()
            .map(|items| {
                items
                    .iter()
                    .rev()
                    .filter(|item| item.parent_id == parent_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }
}

#[async_trait::async_trait]
impl ChildStore for InMemoryChildStore {
    async fn create_child(&self, record: ChildRecord) -> Result<ChildRecord, StorageError> {
        ensure_parent(&record.parent_id)?;
        let mut items = self
            .children
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if items.iter().any(|item| item.child_id == record.child_id) {
            return Err(StorageError::new("child exists"));
        }
        items.push(record.clone());
        Ok(record)
    }

    async fn list_children(
        &self,
        parent_id: &str,
        page: PageRequest,
    ) -> Result<ChildPage, StorageError> {
        ensure_parent(parent_id)?;
        let items = self.for_parent(parent_id);
        let total_count = items.len() as u64;
        let children = items
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.page_size as usize)
            .collect();
        Ok(ChildPage {
            children,
            total_count,
        })
    }

    async fn search_children(
        &self,
        parent_id: &str,
        query: &str,
    ) -> Result<Vec<ChildRecord>, StorageError> {
        ensure_parent(parent_id)?;
        Ok(self
            .for_parent(parent_id)
            .into_iter()
            .filter(|item| {
                contains_ignore_case(&item.name, query)
                    || contains_ignore_case(&item.phone, query)
                    || contains_ignore_case(&item.domain, query)
                    || contains_ignore_case(&item.email, query)
            })
            .collect())
    }

    async fn find_child(
        &self,
        parent_id: &str,
        child_id: &str,
    ) -> Result<Option<ChildRecord>, StorageError> {
        ensure_parent(parent_id)?;
        let item = self
            .children
            .read()
            .ok()
            .and_then(|items| items.iter().find(|item| item.child_id == child_id).cloned())
            .filter(|item| item.parent_id == parent_id);
        Ok(item)
    }

    async fn find_child_by_id(&self, child_id: &str) -> Result<Option<ChildRecord>, StorageError> {
        Ok(self
            .children
            .read()
            .ok()
            .and_then(|items| items.iter().find(|item| item.child_id == child_id).cloned()))
    }

    async fn update_child_field(
        &self,
        child_id: &str,
        update: ChildFieldUpdate,
    ) -> Result<Option<ChildRecord>, StorageError> {
        let mut items = self
            .children
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(child) = items.iter_mut().find(|item| item.child_id == child_id) else {
            return Ok(None);
        };
        match update {
            ChildFieldUpdate::Name(value) => child.name = value,
            ChildFieldUpdate::Email(value) => child.email = value,
            ChildFieldUpdate::Phone(value) => child.phone = value,
            ChildFieldUpdate::Domain(value) => child.domain = value,
            ChildFieldUpdate::TotalAmount(value) => child.total_amt = value,
            ChildFieldUpdate::Status(value) => child.status = value,
            ChildFieldUpdate::JoinDate(value) => child.join_date = value,
            ChildFieldUpdate::DatabaseUrl(value) => child.database_url = value,
        }
        child.updated_at = Utc::now();
        Ok(Some(child.clone()))
    }

    async fn delete_child(&self, child_id: &str) -> Result<Option<ChildRecord>, StorageError> {
        let mut items = self
            .children
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let removed = items
            .iter()
            .position(|item| item.child_id == child_id)
            .map(|index| items.remove(index));
        Ok(removed)
    }

    async fn summarize_children(&self, parent_id: &str) -> Result<ChildSummary, StorageError> {
        ensure_parent(parent_id)?;
        let items = self.for_parent(parent_id);
        Ok(ChildSummary {
            total: items.len() as u64,
            active: items.iter().filter(|item| item.status).count() as u64,
            total_amount: items.iter().map(|item| item.total_amt).sum(),
        })
    }
}
