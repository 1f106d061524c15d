//! Postgres 版本公告存储实现

use crate::error::StorageError;
use crate::models::{UpdatePatch, UpdateRecord};
use crate::traits::UpdateStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgUpdateStore {
    pub pool: PgPool,
}

impl PgUpdateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_update(row: PgRow) -> Result<UpdateRecord, StorageError> {
    Ok(UpdateRecord {
        update_id: row.try_get("update_id")?,
        title: row.try_get("title")?,
        show: row.try_get("show")?,
        link: row.try_get("link")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl UpdateStore for PgUpdateStore {
    async fn create_update(&self, record: UpdateRecord) -> Result<UpdateRecord, StorageError> {
        sqlx::query(
            "insert into updates (update_id, title, show, link, created_at, updated_at) \
             values ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&record.update_id)
        .bind(&record.title)
        .bind(record.show)
        .bind(&record.link)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_updates(&self, visible_only: bool) -> Result<Vec<UpdateRecord>, StorageError> {
        let rows = sqlx::query(
            "select update_id, title, show, link, created_at, updated_at from updates \
             where ($1 = false or show = true) order by created_at desc",
        )
        .bind(visible_only)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(row_to_update).collect()
    }

    async fn update_update(
        &self,
        update_id: &str,
        patch: UpdatePatch,
    ) -> Result<Option<UpdateRecord>, StorageError> {
        let row = sqlx::query(
            "update updates set \
             title = coalesce($1, title), \
             show = coalesce($2, show), \
             link = coalesce($3, link), \
             updated_at = now() \
             where update_id = $4 \
             returning update_id, title, show, link, created_at, updated_at",
        )
        .bind(patch.title)
        .bind(patch.show)
        .bind(patch.link)
        .bind(update_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(row_to_update).transpose()
    }

    async fn delete_update(&self, update_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from updates where update_id = $1")
            .bind(update_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
