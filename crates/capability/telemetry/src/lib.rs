//! 追踪、请求 ID 与进程内计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub bookings_created: u64,
    pub booking_status_changes: u64,
    pub contact_requests_submitted: u64,
    pub contact_requests_rejected: u64,
    pub reports_generated: u64,
    pub reports_exported: u64,
    pub dashboard_computations: u64,
    pub dashboard_cache_hits: u64,
    pub dashboard_fallbacks: u64,
    pub change_events_published: u64,
}

/// 进程级计数指标。
#[derive(Default)]
pub struct TelemetryMetrics {
    bookings_created: AtomicU64,
    booking_status_changes: AtomicU64,
    contact_requests_submitted: AtomicU64,
    contact_requests_rejected: AtomicU64,
    reports_generated: AtomicU64,
    reports_exported: AtomicU64,
    dashboard_computations: AtomicU64,
    dashboard_cache_hits: AtomicU64,
    dashboard_fallbacks: AtomicU64,
    change_events_published: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            bookings_created: self.bookings_created.load(Ordering::Relaxed),
            booking_status_changes: self.booking_status_changes.load(Ordering::Relaxed),
            contact_requests_submitted: self.contact_requests_submitted.load(Ordering::Relaxed),
            contact_requests_rejected: self.contact_requests_rejected.load(Ordering::Relaxed),
            reports_generated: self.reports_generated.load(Ordering::Relaxed),
            reports_exported: self.reports_exported.load(Ordering::Relaxed),
            dashboard_computations: self.dashboard_computations.load(Ordering::Relaxed),
            dashboard_cache_hits: self.dashboard_cache_hits.load(Ordering::Relaxed),
            dashboard_fallbacks: self.dashboard_fallbacks.load(Ordering::Relaxed),
            change_events_published: self.change_events_published.load(Ordering::Relaxed),
        }
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，可通过 RUST_LOG 覆盖）。
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

/// 记录预订创建次数（含批量导入）。
pub fn record_bookings_created(count: u64) {
    metrics()
        .bookings_created
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录预订状态变更次数。
pub fn record_booking_status_change() {
    metrics()
        .booking_status_changes
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录联系申请提交成功次数。
pub fn record_contact_request_submitted() {
    metrics()
        .contact_requests_submitted
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录联系申请校验失败次数。
pub fn record_contact_request_rejected() {
    metrics()
        .contact_requests_rejected
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录报表生成次数。
pub fn record_report_generated() {
    metrics().reports_generated.fetch_add(1, Ordering::Relaxed);
}

/// 记录报表导出次数。
pub fn record_report_exported() {
    metrics().reports_exported.fetch_add(1, Ordering::Relaxed);
}

/// 记录看板统计重新计算次数。
pub fn record_dashboard_computation() {
    metrics()
        .dashboard_computations
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录看板统计命中缓存次数。
pub fn record_dashboard_cache_hit() {
    metrics()
        .dashboard_cache_hits
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录看板统计降级为兜底常量次数。
pub fn record_dashboard_fallback() {
    metrics()
        .dashboard_fallbacks
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录变更事件广播次数。
pub fn record_change_event_published() {
    metrics()
        .change_events_published
        .fetch_add(1, Ordering::Relaxed);
}
