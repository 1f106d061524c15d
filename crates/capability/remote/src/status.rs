//! Active 状态读取与切换
//!
//! 切换为「先读后写」两条语句，未加事务；并发切换同一行时结果取决于外部库的执行顺序。

use crate::connection::ConnectionString;
use crate::driver::{RemoteDriver, RemoteSession};
use crate::error::RemoteError;
use std::sync::Arc;

/// Active 状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveStatus {
    pub status: bool,
}

/// 状态读写错误。
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("No active status found")]
    NotFound,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

pub struct StatusService {
    driver: Arc<dyn RemoteDriver>,
}

impl StatusService {
    pub fn new(driver: Arc<dyn RemoteDriver>) -> Self {
        Self { driver }
    }

    /// 读取外部库的 Active 状态。
    pub async fn read_status(&self, target: &ConnectionString) -> Result<ActiveStatus, StatusError> {
        let session = self.driver.connect(target).await?;
        let result = read(session.as_ref()).await;
        session.close().await;
        if result.is_ok() {
            guard_telemetry::record_status_read();
        }
        result
    }

    /// 取反并写回 Active 状态，返回写入后的值。
    pub async fn toggle_status(
        &self,
        target: &ConnectionString,
    ) -> Result<ActiveStatus, StatusError> {
        let session = self.driver.connect(target).await?;
        let result = toggle(session.as_ref()).await;
        session.close().await;
        if let Ok(active) = &result {
            guard_telemetry::record_status_toggle();
            tracing::info!(host = %target.host(), status = active.status, "api status toggled");
        }
        result
    }
}

async fn read(session: &dyn RemoteSession) -> Result<ActiveStatus, StatusError> {
    let status = session
        .fetch_active_status()
        .await?
        .ok_or(StatusError::NotFound)?;
    Ok(ActiveStatus { status })
}

async fn toggle(session: &dyn RemoteSession) -> Result<ActiveStatus, StatusError> {
    let current = read(session).await?;
    let status = session
        .store_active_status(!current.status)
        .await?
        .ok_or(StatusError::NotFound)?;
    Ok(ActiveStatus { status })
}
