//! Postgres 子账户存储实现
//!
//! 字段级更新的列名来自封闭的 ChildField 集合，不拼接任何调用方输入。

use crate::error::StorageError;
use crate::models::{ChildPage, ChildRecord, ChildSummary};
use crate::traits::ChildStore;
use crate::validation::{ensure_parent, search_pattern};
use domain::{ChildField, ChildFieldUpdate, PageRequest};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub(crate) const CHILD_COLUMNS: &str = "child_id, parent_id, name, email, phone, domain, total_amt, \
     password_hash, status, join_date, database_url, created_at, updated_at";

pub struct PgChildStore {
    pub pool: PgPool,
}

impl PgChildStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 通过数据库 URL 建立连接池
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

fn child_column(field: ChildField) -> &'static str {
    match field {
        ChildField::Name => "name",
        ChildField::Email => "email",
        ChildField::Phone => "phone",
        ChildField::Domain => "domain",
        ChildField::TotalAmount => "total_amt",
        ChildField::Status => "status",
        ChildField::JoinDate => "join_date",
        ChildField::DatabaseUrl => "database_url",
    }
}

fn row_to_child(row: PgRow) -> Result<ChildRecord, StorageError> {
    Ok(ChildRecord {
        child_id: row.try_get("child_id")?,
        parent_id: row.try_get("parent_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        domain: row.try_get("domain")?,
        total_amt: row.try_get("total_amt")?,
        password_hash: row.try_get("password_hash")?,
        status: row.try_get("status")?,
        join_date: row.try_get("join_date")?,
        database_url: row.try_get("database_url")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl ChildStore for PgChildStore {
    async fn create_child(&self, record: ChildRecord) -> Result<ChildRecord, StorageError> {
        ensure_parent(&record.parent_id)?;
        sqlx::query(
            "insert into children (child_id, parent_id, name, email, phone, domain, total_amt, \
             password_hash, status, join_date, database_url, created_at, updated_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(&record.child_id)
        .bind(&record.parent_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.domain)
        .bind(record.total_amt)
        .bind(&record.password_hash)
        .bind(record.status)
        .bind(record.join_date)
        .bind(&record.database_url)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_children(
        &self,
        parent_id: &str,
        page: PageRequest,
    ) -> Result<ChildPage, StorageError> {
        ensure_parent(parent_id)?;
        let sql = format!(
            "select {CHILD_COLUMNS} from children where parent_id = $1 \
             order by created_at desc limit $2 offset $3"
        );
        let rows = sqlx::query(&sql)
            .bind(parent_id)
            .bind(i64::from(page.page_size))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = sqlx::query_scalar("select count(*) from children where parent_id = $1")
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await?;
        let mut children = Vec::with_capacity(rows.len());
        for row in rows {
            children.push(row_to_child(row)?);
        }
        Ok(ChildPage {
            children,
            total_count: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn search_children(
        &self,
        parent_id: &str,
        query: &str,
    ) -> Result<Vec<ChildRecord>, StorageError> {
        ensure_parent(parent_id)?;
        let sql = format!(
            "select {CHILD_COLUMNS} from children where parent_id = $1 \
             and (name ilike $2 or phone ilike $2 or domain ilike $2 or email ilike $2) \
             order by created_at desc"
        );
        let rows = sqlx::query(&sql)
            .bind(parent_id)
            .bind(search_pattern(query))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(row_to_child).collect()
    }

    async fn find_child(
        &self,
        parent_id: &str,
        child_id: &str,
    ) -> Result<Option<ChildRecord>, StorageError> {
        ensure_parent(parent_id)?;
        let sql =
            format!("select {CHILD_COLUMNS} from children where parent_id = $1 and child_id = $2");
        let row = sqlx::query(&sql)
            .bind(parent_id)
            .bind(child_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_child).transpose()
    }

    async fn find_child_by_id(&self, child_id: &str) -> Result<Option<ChildRecord>, StorageError> {
        let sql = format!("select {CHILD_COLUMNS} from children where child_id = $1");
        let row = sqlx::query(&sql)
            .bind(child_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_child).transpose()
    }

    async fn update_child_field(
        &self,
        child_id: &str,
        update: ChildFieldUpdate,
    ) -> Result<Option<ChildRecord>, StorageError> {
        let column = child_column(update.field());
        let sql = format!(
            "update children set {column} = $1, updated_at = now() \
             where child_id = $2 returning {CHILD_COLUMNS}"
        );
        let query = sqlx::query(&sql);
        let query = match update {
            ChildFieldUpdate::Name(value)
            | ChildFieldUpdate::Email(value)
            | ChildFieldUpdate::Phone(value)
            | ChildFieldUpdate::Domain(value)
            | ChildFieldUpdate::DatabaseUrl(value) => query.bind(value),
            ChildFieldUpdate::TotalAmount(value) => query.bind(value),
            ChildFieldUpdate::Status(value) => query.bind(value),
            ChildFieldUpdate::JoinDate(value) => query.bind(value),
        };
        let row = query.bind(child_id).fetch_optional(&self.pool).await?;
        row.map(row_to_child).transpose()
    }

    async fn delete_child(&self, child_id: &str) -> Result<Option<ChildRecord>, StorageError> {
        let sql = format!("delete from children where child_id = $1 returning {CHILD_COLUMNS}");
        let row = sqlx::query(&sql)
            .bind(child_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_child).transpose()
    }

    async fn summarize_children(&self, parent_id: &str) -> Result<ChildSummary, StorageError> {
        ensure_parent(parent_id)?;
        let row = sqlx::query(
            "select count(*) as total, \
             count(*) filter (where status) as active, \
             coalesce(sum(total_amt), 0)::double precision as total_amount \
             from children where parent_id = $1",
        )
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await?;
        let total: i64 = row.try_get("total")?;
        let active: i64 = row.try_get("active")?;
        Ok(ChildSummary {
            total: u64::try_from(total).unwrap_or_default(),
            active: u64::try_from(active).unwrap_or_default(),
            total_amount: row.try_get("total_amount")?,
        })
    }
}
