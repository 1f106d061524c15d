//! 追踪与请求 ID 生成。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 基础指标快照（MVP）。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub probes_succeeded: u64,
    pub probes_failed: u64,
    pub status_reads: u64,
    pub status_toggles: u64,
    pub registrations: u64,
    pub registration_conflicts: u64,
    pub provisioning_failures: u64,
    pub remote_connects: u64,
    pub remote_closes: u64,
}

/// 基础指标（MVP）。
#[derive(Default)]
pub struct TelemetryMetrics {
    probes_succeeded: AtomicU64,
    probes_failed: AtomicU64,
    status_reads: AtomicU64,
    status_toggles: AtomicU64,
    registrations: AtomicU64,
    registration_conflicts: AtomicU64,
    provisioning_failures: AtomicU64,
    remote_connects: AtomicU64,
    remote_closes: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            probes_succeeded: self.probes_succeeded.load(Ordering::Relaxed),
            probes_failed: self.probes_failed.load(Ordering::Relaxed),
            status_reads: self.status_reads.load(Ordering::Relaxed),
            status_toggles: self.status_toggles.load(Ordering::Relaxed),
            registrations: self.registrations.load(Ordering::Relaxed),
            registration_conflicts: self.registration_conflicts.load(Ordering::Relaxed),
            provisioning_failures: self.provisioning_failures.load(Ordering::Relaxed),
            remote_connects: self.remote_connects.load(Ordering::Relaxed),
            remote_closes: self.remote_closes.load(Ordering::Relaxed),
        }
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例（MVP）。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录连通性探测结果。
pub fn record_probe(success: bool) {
    let metrics = metrics();
    if success {
        metrics.probes_succeeded.fetch_add(1, Ordering::Relaxed);
    } else {
        metrics.probes_failed.fetch_add(1, Ordering::Relaxed);
    }
}

/// 记录 Active 状态读取次数。
pub fn record_status_read() {
    metrics().status_reads.fetch_add(1, Ordering::Relaxed);
}

/// 记录 Active 状态切换次数。
pub fn record_status_toggle() {
    metrics().status_toggles.fetch_add(1, Ordering::Relaxed);
}

/// 记录远端用户注册成功次数。
pub fn record_registration() {
    metrics().registrations.fetch_add(1, Ordering::Relaxed);
}

/// 记录重复邮箱注册被拒次数。
pub fn record_registration_conflict() {
    metrics()
        .registration_conflicts
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录初始化（基线数据写入）失败次数。
pub fn record_provisioning_failure() {
    metrics()
        .provisioning_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录外部库连接建立次数。
pub fn record_remote_connect() {
    metrics().remote_connects.fetch_add(1, Ordering::Relaxed);
}

/// 记录外部库连接池关闭次数。
pub fn record_remote_close() {
    metrics().remote_closes.fetch_add(1, Ordering::Relaxed);
}
