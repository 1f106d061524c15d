//! 内存外部库驱动
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 按连接串登记若干个内存数据库（未登记的连接串视为主机不可达）
//! - 统计 connect/close 次数，用于校验会话释放
//! - 可注入连接失败与缺失表（模拟初始化中途失败）

use crate::connection::ConnectionString;
use crate::driver::{
    ACTIVE_TABLE, CATEGORIES_TABLE, RemoteDriver, RemoteSession, RemoteUser, USER_LIMIT_TABLE,
    USERS_TABLE,
};
use crate::error::{ConnectivityError, RemoteError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// 内存中的外部库内容。
#[derive(Debug, Clone, Default)]
pub struct RemoteDatabase {
    pub users: Vec<RemoteUser>,
    /// Active 表行：(id, status)，status 可为 NULL
    pub active_status: Vec<(String, Option<bool>)>,
    /// UserLimit 表行：(id, maxRole)
    pub user_limits: Vec<(String, i32)>,
    /// categories 表行：(id, name)
    pub categories: Vec<(String, String)>,
    /// 访问时返回 `42P01 relation does not exist` 的表
    pub missing_tables: Vec<String>,
}

impl RemoteDatabase {
    /// 已存在一行 Active 状态的数据库。
    pub fn with_active_status(status: bool) -> Self {
        Self {
            active_status: vec![("active-1".to_string(), Some(status))],
            ..Self::default()
        }
    }

    fn ensure_table(&self, table: &str) -> Result<(), RemoteError> {
        if self.missing_tables.iter().any(|missing| missing == table) {
            return Err(RemoteError::query(
                Some("42P01"),
                format!("relation \"{table}\" does not exist"),
            ));
        }
        Ok(())
    }
}

type Databases = Arc<RwLock<HashMap<String, RemoteDatabase>>>;

/// 内存驱动
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
#[derive(Default)]
pub struct InMemoryRemoteDriver {
    databases: Databases,
    connect_failures: RwLock<HashMap<String, ConnectivityError>>,
    connects: Arc<AtomicU64>,
    closes: Arc<AtomicU64>,
}

impl InMemoryRemoteDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记（或替换）一个连接串对应的数据库。
    pub fn insert_database(&self, url: &str, database: RemoteDatabase) {
        if let Ok(mut map) = self.databases.write() {
            map.insert(url.trim().to_string(), database);
        }
    }

    /// 该连接串后续的 connect 一律返回给定错误。
    pub fn fail_connect(&self, url: &str, err: ConnectivityError) {
        if let Ok(mut map) = self.connect_failures.write() {
            map.insert(url.trim().to_string(), err);
        }
    }

    /// 读取某个数据库的当前内容。
    pub fn database(&self, url: &str) -> Option<RemoteDatabase> {
        self.databases
            .read()
            .ok()
            .and_then(|map| map.get(url.trim()).cloned())
    }

    pub fn connect_count(&self) -> u64 {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> u64 {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteDriver for InMemoryRemoteDriver {
    async fn connect(
        &self,
        target: &ConnectionString,
    ) -> Result<Box<dyn RemoteSession>, RemoteError> {
        let key = target.expose().to_string();
        if let Some(err) = self
            .connect_failures
            .read()
            .ok()
            .and_then(|map| map.get(&key).cloned())
        {
            return Err(err.into());
        }
        let known = self
            .databases
            .read()
            .map(|map| map.contains_key(&key))
            .unwrap_or(false);
        if !known {
            return Err(ConnectivityError::host_unreachable(
                "ENOTFOUND",
                format!("getaddrinfo ENOTFOUND {}", target.host()),
            )
            .into());
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryRemoteSession {
            databases: self.databases.clone(),
            key,
            closes: self.closes.clone(),
        }))
    }
}

struct InMemoryRemoteSession {
    databases: Databases,
    key: String,
    closes: Arc<AtomicU64>,
}

impl InMemoryRemoteSession {
    fn read<T>(
        &self,
        table: &str,
        op: impl FnOnce(&RemoteDatabase) -> T,
    ) -> Result<T, RemoteError> {
        let map = self
            .databases
            .read()
            .map_err(|_| RemoteError::query(None, "database lock poisoned"))?;
        let database = map
            .get(&self.key)
            .ok_or_else(|| RemoteError::query(None, "database dropped"))?;
        database.ensure_table(table)?;
        Ok(op(database))
    }

    fn write<T>(
        &self,
        table: &str,
        op: impl FnOnce(&mut RemoteDatabase) -> Result<T, RemoteError>,
    ) -> Result<T, RemoteError> {
        let mut map = self
            .databases
            .write()
            .map_err(|_| RemoteError::query(None, "database lock poisoned"))?;
        let database = map
            .get_mut(&self.key)
            .ok_or_else(|| RemoteError::query(None, "database dropped"))?;
        database.ensure_table(table)?;
        op(database)
    }
}

#[async_trait]
impl RemoteSession for InMemoryRemoteSession {
    async fn ping(&self) -> Result<(), RemoteError> {
        self.read("", |_| ())
    }

    async fn fetch_active_status(&self) -> Result<Option<bool>, RemoteError> {
        self.read(ACTIVE_TABLE, |db| {
            db.active_status.first().and_then(|(_, status)| *status)
        })
    }

    async fn active_status_exists(&self) -> Result<bool, RemoteError> {
        self.read(ACTIVE_TABLE, |db| !db.active_status.is_empty())
    }

    async fn store_active_status(&self, status: bool) -> Result<Option<bool>, RemoteError> {
        self.write(ACTIVE_TABLE, |db| {
            for row in db.active_status.iter_mut() {
                row.1 = Some(status);
            }
            Ok(db.active_status.first().and_then(|(_, status)| *status))
        })
    }

    async fn insert_active_status(&self, id: &str, status: bool) -> Result<(), RemoteError> {
        self.write(ACTIVE_TABLE, |db| {
            db.active_status.push((id.to_string(), Some(status)));
            Ok(())
        })
    }

    async fn user_exists(&self, email: &str) -> Result<bool, RemoteError> {
        self.read(USERS_TABLE, |db| db.users.iter().any(|user| user.email == email))
    }

    async fn insert_user(&self, user: &RemoteUser) -> Result<(), RemoteError> {
        self.write(USERS_TABLE, |db| {
            if db.users.iter().any(|existing| existing.email == user.email) {
                return Err(RemoteError::query(
                    Some("23505"),
                    "duplicate key value violates unique constraint \"users_email_key\"",
                ));
            }
            db.users.push(user.clone());
            Ok(())
        })
    }

    async fn user_limit_exists(&self) -> Result<bool, RemoteError> {
        self.read(USER_LIMIT_TABLE, |db| !db.user_limits.is_empty())
    }

    async fn insert_user_limit(&self, id: &str, max_role: i32) -> Result<(), RemoteError> {
        self.write(USER_LIMIT_TABLE, |db| {
            db.user_limits.push((id.to_string(), max_role));
            Ok(())
        })
    }

    async fn category_exists(&self, name: &str) -> Result<bool, RemoteError> {
        self.read(CATEGORIES_TABLE, |db| {
            db.categories.iter().any(|(_, existing)| existing == name)
        })
    }

    async fn insert_category(&self, id: &str, name: &str) -> Result<(), RemoteError> {
        self.write(CATEGORIES_TABLE, |db| {
            db.categories.push((id.to_string(), name.to_string()));
            Ok(())
        })
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
