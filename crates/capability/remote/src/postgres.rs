//! PostgreSQL 外部库驱动（Connection Factory 的生产实现）
//!
//! 每次 `connect` 直接建立一条专用连接（相当于容量为 1 的临时连接池），只尝试一次：
//! - TLS：托管服务标记或开发模式使用 `sslmode=require`（不校验证书），其余 `verify-full`
//! - 建连超时：`connect_timeout`（默认 10 秒）
//! - 单语句超时：`query_timeout`（默认 5 秒，客户端计时 + 服务端 statement_timeout）
//!
//! 不经过 `PgPoolOptions::connect_with`：连接池会对 ConnectionRefused 反复重试直到
//! acquire_timeout，拒绝连接会被误报为超时。

use crate::connection::{ConnectionSettings, ConnectionString};
use crate::driver::{RemoteDriver, RemoteSession, RemoteUser};
use crate::error::{ConnectivityError, RemoteError};
use async_trait::async_trait;
use domain::TlsMode;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Connection, PgConnection};
use std::future::Future;
use std::io::ErrorKind;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::Mutex;

/// sqlx 连接工厂。
#[derive(Debug, Clone, Default)]
pub struct PgRemoteDriver {
    settings: ConnectionSettings,
}

impl PgRemoteDriver {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// 由连接串生成 sqlx 连接参数（含 TLS 模式与服务端语句超时）。
    pub fn connect_options(&self, target: &ConnectionString) -> Result<PgConnectOptions, RemoteError> {
        let options = PgConnectOptions::from_str(target.expose())
            .map_err(|_| RemoteError::InvalidConnectionString)?;
        let ssl_mode = ssl_mode_for(self.settings.tls_mode_for(options.get_host()));
        let statement_timeout_ms = self.settings.query_timeout.as_millis().to_string();
        Ok(options
            .ssl_mode(ssl_mode)
            .options([("statement_timeout", statement_timeout_ms)]))
    }
}

#[async_trait]
impl RemoteDriver for PgRemoteDriver {
    async fn connect(
        &self,
        target: &ConnectionString,
    ) -> Result<Box<dyn RemoteSession>, RemoteError> {
        let options = self.connect_options(target)?;
        let connect_timeout = self.settings.connect_timeout;
        let connecting = PgConnection::connect_with(&options);
        let conn = match tokio::time::timeout(connect_timeout, connecting).await {
            Ok(Ok(conn)) => conn,
            Ok(Err(err)) => return Err(classify_sqlx_error(&err).into()),
            Err(_) => {
                return Err(ConnectivityError::timed_out(format!(
                    "connection not established within {} ms",
                    connect_timeout.as_millis()
                ))
                .into());
            }
        };
        guard_telemetry::record_remote_connect();
        tracing::debug!(host = %target.host(), "remote connection opened");
        Ok(Box::new(PgRemoteSession {
            conn: Mutex::new(Some(conn)),
            query_timeout: self.settings.query_timeout,
        }))
    }
}

/// 单请求会话（持有专用连接，`close` 后为 None）。
pub struct PgRemoteSession {
    conn: Mutex<Option<PgConnection>>,
    query_timeout: Duration,
}

impl PgRemoteSession {
    async fn bounded<T, F>(&self, query: F) -> Result<T, RemoteError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(|err| query_error(&err)),
            Err(_) => Err(RemoteError::QueryTimedOut(
                u64::try_from(self.query_timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }
}

fn live(conn: &mut Option<PgConnection>) -> Result<&mut PgConnection, RemoteError> {
    conn.as_mut()
        .ok_or_else(|| RemoteError::query(None, "remote session already closed"))
}

#[async_trait]
impl RemoteSession for PgRemoteSession {
    async fn ping(&self) -> Result<(), RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        let _: i32 = self
            .bounded(sqlx::query_scalar("SELECT 1").fetch_one(&mut *conn))
            .await?;
        Ok(())
    }

    async fn fetch_active_status(&self) -> Result<Option<bool>, RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        let status: Option<Option<bool>> = self
            .bounded(
                sqlx::query_scalar(r#"SELECT status FROM "Active" LIMIT 1"#)
                    .fetch_optional(&mut *conn),
            )
            .await?;
        Ok(status.flatten())
    }

    async fn active_status_exists(&self) -> Result<bool, RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        let found: Option<i32> = self
            .bounded(
                sqlx::query_scalar(r#"SELECT 1 FROM "Active" LIMIT 1"#)
                    .fetch_optional(&mut *conn),
            )
            .await?;
        Ok(found.is_some())
    }

    async fn store_active_status(&self, status: bool) -> Result<Option<bool>, RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        let stored: Option<Option<bool>> = self
            .bounded(
                sqlx::query_scalar(r#"UPDATE "Active" SET status = $1 RETURNING status"#)
                    .bind(status)
                    .fetch_optional(&mut *conn),
            )
            .await?;
        Ok(stored.flatten())
    }

    async fn insert_active_status(&self, id: &str, status: bool) -> Result<(), RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        self.bounded(
            sqlx::query(r#"INSERT INTO "Active" (id, status) VALUES ($1, $2)"#)
                .bind(id)
                .bind(status)
                .execute(&mut *conn),
        )
        .await?;
        Ok(())
    }

    async fn user_exists(&self, email: &str) -> Result<bool, RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        let found: Option<i32> = self
            .bounded(
                sqlx::query_scalar(r#"SELECT 1 FROM "users" WHERE email = $1 LIMIT 1"#)
                    .bind(email)
                    .fetch_optional(&mut *conn),
            )
            .await?;
        Ok(found.is_some())
    }

    async fn insert_user(&self, user: &RemoteUser) -> Result<(), RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        self.bounded(
            sqlx::query(
                r#"INSERT INTO "users" (id, email, name, password, role, created_at, updated_at)
                   VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
            )
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password)
            .bind(&user.role)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&mut *conn),
        )
        .await?;
        Ok(())
    }

    async fn user_limit_exists(&self) -> Result<bool, RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        let found: Option<i32> = self
            .bounded(
                sqlx::query_scalar(r#"SELECT 1 FROM "UserLimit" LIMIT 1"#)
                    .fetch_optional(&mut *conn),
            )
            .await?;
        Ok(found.is_some())
    }

    async fn insert_user_limit(&self, id: &str, max_role: i32) -> Result<(), RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        self.bounded(
            sqlx::query(r#"INSERT INTO "UserLimit" (id, "maxRole") VALUES ($1, $2)"#)
                .bind(id)
                .bind(max_role)
                .execute(&mut *conn),
        )
        .await?;
        Ok(())
    }

    async fn category_exists(&self, name: &str) -> Result<bool, RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        let found: Option<i32> = self
            .bounded(
                sqlx::query_scalar(r#"SELECT 1 FROM "categories" WHERE name = $1 LIMIT 1"#)
                    .bind(name)
                    .fetch_optional(&mut *conn),
            )
            .await?;
        Ok(found.is_some())
    }

    async fn insert_category(&self, id: &str, name: &str) -> Result<(), RemoteError> {
        let mut guard = self.conn.lock().await;
        let conn = live(&mut guard)?;
        self.bounded(
            sqlx::query(r#"INSERT INTO "categories" (id, name) VALUES ($1, $2)"#)
                .bind(id)
                .bind(name)
                .execute(&mut *conn),
        )
        .await?;
        Ok(())
    }

    async fn close(&self) {
        let conn = self.conn.lock().await.take();
        if let Some(conn) = conn {
            if let Err(err) = conn.close().await {
                tracing::debug!(error = %err, "remote connection close failed");
            }
            guard_telemetry::record_remote_close();
        }
    }
}

fn ssl_mode_for(mode: TlsMode) -> PgSslMode {
    match mode {
        TlsMode::Permissive => PgSslMode::Require,
        TlsMode::Strict => PgSslMode::VerifyFull,
    }
}

/// 将 sqlx 错误归类为连通性错误。
pub fn classify_sqlx_error(err: &sqlx::Error) -> ConnectivityError {
    match err {
        sqlx::Error::Database(db) => {
            let code = db.code().map(|code| code.into_owned());
            if code.as_deref() == Some("28P01") {
                ConnectivityError::authentication_failed(db.message())
            } else {
                ConnectivityError::unknown(code, db.message())
            }
        }
        sqlx::Error::Io(io) => classify_io_error(io),
        sqlx::Error::PoolTimedOut => ConnectivityError::timed_out(err.to_string()),
        other => ConnectivityError::unknown(None, other.to_string()),
    }
}

fn classify_io_error(io: &std::io::Error) -> ConnectivityError {
    match io.kind() {
        ErrorKind::ConnectionRefused
        | ErrorKind::HostUnreachable
        | ErrorKind::NetworkUnreachable => {
            ConnectivityError::host_unreachable("ECONNREFUSED", io.to_string())
        }
        ErrorKind::NotFound | ErrorKind::AddrNotAvailable => {
            ConnectivityError::host_unreachable("ENOTFOUND", io.to_string())
        }
        ErrorKind::TimedOut => ConnectivityError::timed_out(io.to_string()),
        _ if io.to_string().contains("failed to lookup address") => {
            ConnectivityError::host_unreachable("ENOTFOUND", io.to_string())
        }
        _ => ConnectivityError::unknown(None, io.to_string()),
    }
}

/// 查询阶段错误：数据库返回的错误保留 SQLSTATE，其余按连通性归类。
fn query_error(err: &sqlx::Error) -> RemoteError {
    match err {
        sqlx::Error::Database(db) => RemoteError::query(db.code().as_deref(), db.message()),
        other => classify_sqlx_error(other).into(),
    }
}
