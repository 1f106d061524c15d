//! 连通性探测（Liveness Prober）
//!
//! 单次探测：建立会话 → `SELECT 1` → 关闭会话。不重试，失败立即返回分类结果。

use crate::connection::ConnectionString;
use crate::driver::RemoteDriver;
use crate::error::RemoteError;
use std::sync::Arc;

pub const PROBE_SUCCESS_MESSAGE: &str = "Database connection successful";

/// 探测结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub success: bool,
    pub message: String,
    /// 驱动原始错误描述（失败时）
    pub error: Option<String>,
    /// 驱动错误码（失败时，可能缺失）
    pub code: Option<String>,
}

impl ProbeReport {
    fn succeeded() -> Self {
        Self {
            success: true,
            message: PROBE_SUCCESS_MESSAGE.to_string(),
            error: None,
            code: None,
        }
    }

    fn failed(err: RemoteError) -> Self {
        let err = err.into_connectivity();
        Self {
            success: false,
            message: err.message().to_string(),
            error: Some(err.detail().to_string()),
            code: err.code().map(str::to_string),
        }
    }
}

pub struct LivenessProber {
    driver: Arc<dyn RemoteDriver>,
}

impl LivenessProber {
    pub fn new(driver: Arc<dyn RemoteDriver>) -> Self {
        Self { driver }
    }

    /// 对外部库执行一次连通性探测。
    pub async fn probe(&self, target: &ConnectionString) -> ProbeReport {
        let report = match self.driver.connect(target).await {
            Ok(session) => {
                let outcome = session.ping().await;
                session.close().await;
                match outcome {
                    Ok(()) => ProbeReport::succeeded(),
                    Err(err) => ProbeReport::failed(err),
                }
            }
            Err(err) => ProbeReport::failed(err),
        };
        if report.success {
            tracing::info!(host = %target.host(), "database probe succeeded");
        } else {
            tracing::warn!(
                host = %target.host(),
                code = report.code.as_deref().unwrap_or("-"),
                error = report.error.as_deref().unwrap_or_default(),
                "database probe failed"
            );
        }
        guard_telemetry::record_probe(report.success);
        report
    }
}
