use hms_telemetry::{metrics, new_request_ids, record_dashboard_fallback, record_report_generated};

#[test]
fn request_ids_non_empty() {
    let ids = new_request_ids();
    assert!(!ids.request_id.is_empty());
    assert!(!ids.trace_id.is_empty());
    assert_ne!(ids.request_id, ids.trace_id);
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_report_generated();
    record_dashboard_fallback();
    record_dashboard_fallback();
    let after = metrics().snapshot();
    assert!(after.reports_generated >= before.reports_generated + 1);
    assert!(after.dashboard_fallbacks >= before.dashboard_fallbacks + 2);
}
