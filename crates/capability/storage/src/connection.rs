//! 数据库连接管理
//!
//! 提供本地库（子账户、版本公告）的连接池初始化：
//! - connect_pool：建立 Postgres 连接池
//!
//! 外部客户库不走这里，由 guard-remote 按请求单独建立连接。本地库模式不在此处迁移，见 `postgres` 模块说明。

use crate::error::StorageError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// 建立 Postgres 连接池
///
/// # 参数
/// - `database_url`：Postgres 连接字符串
///
/// # 返回
/// - `Result<PgPool, StorageError>`：连接池或错误
pub async fn connect_pool(database_url: &str) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}
