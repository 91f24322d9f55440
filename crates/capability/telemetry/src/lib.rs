//! 追踪初始化、扫描 ID 生成与进程内计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub snapshots_received: u64,
    pub records_decoded: u64,
    pub records_dropped: u64,
    pub subscription_errors: u64,
    pub qr_scans: u64,
    pub qr_article_hits: u64,
    pub qr_work_order_hits: u64,
    pub qr_not_found: u64,
    pub login_success: u64,
    pub login_failure: u64,
    pub logouts: u64,
}

/// 进程内计数器。
pub struct TelemetryMetrics {
    snapshots_received: AtomicU64,
    records_decoded: AtomicU64,
    records_dropped: AtomicU64,
    subscription_errors: AtomicU64,
    qr_scans: AtomicU64,
    qr_article_hits: AtomicU64,
    qr_work_order_hits: AtomicU64,
    qr_not_found: AtomicU64,
    login_success: AtomicU64,
    login_failure: AtomicU64,
    logouts: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            snapshots_received: AtomicU64::new(0),
            records_decoded: AtomicU64::new(0),
            records_dropped: AtomicU64::new(0),
            subscription_errors: AtomicU64::new(0),
            qr_scans: AtomicU64::new(0),
            qr_article_hits: AtomicU64::new(0),
            qr_work_order_hits: AtomicU64::new(0),
            qr_not_found: AtomicU64::new(0),
            login_success: AtomicU64::new(0),
            login_failure: AtomicU64::new(0),
            logouts: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            snapshots_received: self.snapshots_received.load(Ordering::Relaxed),
            records_decoded: self.records_decoded.load(Ordering::Relaxed),
            records_dropped: self.records_dropped.load(Ordering::Relaxed),
            subscription_errors: self.subscription_errors.load(Ordering::Relaxed),
            qr_scans: self.qr_scans.load(Ordering::Relaxed),
            qr_article_hits: self.qr_article_hits.load(Ordering::Relaxed),
            qr_work_order_hits: self.qr_work_order_hits.load(Ordering::Relaxed),
            qr_not_found: self.qr_not_found.load(Ordering::Relaxed),
            login_success: self.login_success.load(Ordering::Relaxed),
            login_failure: self.login_failure.load(Ordering::Relaxed),
            logouts: self.logouts.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的扫描会话 ID。
pub fn new_scan_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录一次远端快照到达。
pub fn record_snapshot_received() {
    metrics().snapshots_received.fetch_add(1, Ordering::Relaxed);
}

/// 记录成功解码的记录数。
pub fn record_records_decoded(count: u64) {
    metrics().records_decoded.fetch_add(count, Ordering::Relaxed);
}

/// 记录被丢弃（无法解码）的记录数。
pub fn record_records_dropped(count: u64) {
    metrics().records_dropped.fetch_add(count, Ordering::Relaxed);
}

/// 记录订阅错误次数。
pub fn record_subscription_error() {
    metrics().subscription_errors.fetch_add(1, Ordering::Relaxed);
}

/// 记录扫描次数。
pub fn record_qr_scan() {
    metrics().qr_scans.fetch_add(1, Ordering::Relaxed);
}

pub fn record_qr_article_hit() {
    metrics().qr_article_hits.fetch_add(1, Ordering::Relaxed);
}

pub fn record_qr_work_order_hit() {
    metrics().qr_work_order_hits.fetch_add(1, Ordering::Relaxed);
}

pub fn record_qr_not_found() {
    metrics().qr_not_found.fetch_add(1, Ordering::Relaxed);
}

/// 记录登录成功次数。
pub fn record_login_success() {
    metrics().login_success.fetch_add(1, Ordering::Relaxed);
}

/// 记录登录失败次数。
pub fn record_login_failure() {
    metrics().login_failure.fetch_add(1, Ordering::Relaxed);
}

pub fn record_logout() {
    metrics().logouts.fetch_add(1, Ordering::Relaxed);
}
