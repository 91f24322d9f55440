use techassist_telemetry::{
    TelemetryMetrics, metrics, new_scan_id, record_qr_scan, record_records_dropped,
};

#[test]
fn scan_ids_are_unique() {
    let first = new_scan_id();
    let second = new_scan_id();
    assert!(!first.is_empty());
    assert_ne!(first, second);
}

#[test]
fn fresh_metrics_start_at_zero() {
    let snapshot = TelemetryMetrics::new().snapshot();
    assert_eq!(snapshot, Default::default());
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_qr_scan();
    record_records_dropped(3);
    let after = metrics().snapshot();
    assert!(after.qr_scans >= before.qr_scans + 1);
    assert!(after.records_dropped >= before.records_dropped + 3);
}
