//! 版本公告内存存储实现

use crate::error::StorageError;
use crate::models::{UpdatePatch, UpdateRecord};
use crate::traits::UpdateStore;
use chrono::Utc;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryUpdateStore {
    updates: RwLock<Vec<UpdateRecord>>,
}

impl InMemoryUpdateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UpdateStore for InMemoryUpdateStore {
    async fn create_update(&self, record: UpdateRecord) -> Result<UpdateRecord, StorageError> {
        let mut items = self
            .updates
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if items.iter().any(|item| item.update_id == record.update_id) {
            return Err(StorageError::new("update exists"));
        }
        items.push(record.clone());
        Ok(record)
    }

    async fn list_updates(&self, visible_only: bool) -> Result<Vec<UpdateRecord>, StorageError> {
        let mut items: Vec<UpdateRecord> = self
            .updates
            .read()
            .map(|items| {
                items
                    .iter()
                    .rev()
                    .filter(|item| !visible_only || item.show)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn update_update(
        &self,
        update_id: &str,
        patch: UpdatePatch,
    ) -> Result<Option<UpdateRecord>, StorageError> {
        let mut items = self
            .updates
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(item) = items.iter_mut().find(|item| item.update_id == update_id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(show) = patch.show {
            item.show = show;
        }
        if let Some(link) = patch.link {
            item.link = Some(link);
        }
        item.updated_at = Utc::now();
        Ok(Some(item.clone()))
    }

    async fn delete_update(&self, update_id: &str) -> Result<bool, StorageError> {
        let mut items = self
            .updates
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let before = items.len();
        items.retain(|item| item.update_id != update_id);
        Ok(items.len() != before)
    }
}
