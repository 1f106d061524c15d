//! # PostgreSQL 存储实现模块
//!
//! 本地库（ClientGuard 自身的数据）的 PostgreSQL 实现，配置 GUARD_DATABASE_URL 时启用。
//!
//! ## 包含的实现
//!
//! - **ChildStore** (`child.rs`)：子账户存储，按 parent_id 隔离
//! - **UpdateStore** (`update.rs`)：版本公告存储
//!
//! ## 数据库模式要求
//!
//! 建表语句见 `migrations/0001_init.sql`。服务启动时不执行迁移，模式由部署流程在服务之外
//! 预先应用（例如 `psql "$GUARD_DATABASE_URL" -f migrations/0001_init.sql`）：
//! - `children`：子账户表（child_id, parent_id, name, email, phone, domain, total_amt,
//!   password_hash, status, join_date, database_url, created_at, updated_at）
//! - `updates`：版本公告表（update_id, title, show, link, created_at, updated_at）
//!
//! ### 索引
//! - `idx_children_parent_created`：(parent_id, created_at desc) 复合索引，覆盖分页列表
//! - `idx_updates_created`：(created_at desc)
//!
//! ## 查询约定
//! - 所有 SQL 使用参数绑定
//! - 使用 `RETURNING` 子句在更新/删除后返回数据，减少额外查询

pub mod child;
pub mod update;

pub use child::*;
pub use update::*;
