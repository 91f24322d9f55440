use chrono::Utc;
use domain::{ArticleCatalog, Priority, WorkOrder, WorkOrderCreate, sample_work_orders};
use techassist_lookup::{ScanResolution, resolve_scan, route_scan};

fn order(task_code: &str, qr: Option<&str>) -> WorkOrder {
    WorkOrder::new(WorkOrderCreate {
        task_code: task_code.to_string(),
        title: task_code.to_string(),
        priority: Priority::High,
        location: "Hall C".to_string(),
        qr_code_data: qr.map(str::to_string),
        ..Default::default()
    })
}

fn resolved_task(resolution: ScanResolution<'_>) -> Option<&str> {
    match resolution {
        ScanResolution::WorkOrder(order) => Some(order.task_code.as_str()),
        _ => None,
    }
}

#[test]
fn article_code_is_case_insensitive() {
    let catalog = ArticleCatalog::builtin();
    match resolve_scan("psu", catalog, &[]) {
        ScanResolution::Article(article) => assert_eq!(article.qr_code_id, "PSU"),
        other => panic!("unexpected resolution: {other:?}"),
    }
}

#[test]
fn article_wins_over_work_order() {
    let catalog = ArticleCatalog::builtin();
    let orders = vec![order("UPS", Some("UPS"))];
    assert!(matches!(
        resolve_scan("UPS", catalog, &orders),
        ScanResolution::Article(_)
    ));
}

#[test]
fn payload_and_task_code_matches() {
    let catalog = ArticleCatalog::builtin();
    let samples = sample_work_orders(Utc::now());
    assert_eq!(
        resolved_task(resolve_scan("wo-9123-a-crac-5", catalog, &samples)),
        Some("WO-9123")
    );
    assert_eq!(
        resolved_task(resolve_scan("  WO-4123 \n", catalog, &samples)),
        Some("WO-4123")
    );
}

#[test]
fn containment_matches_embedded_task_code() {
    let catalog = ArticleCatalog::builtin();
    let orders = vec![order("WO-8472", Some("unrelated"))];
    assert_eq!(
        resolved_task(resolve_scan("WO-8472-B-A12-U24", catalog, &orders)),
        Some("WO-8472")
    );
}

#[test]
fn containment_prefers_longest_task_code() {
    let catalog = ArticleCatalog::builtin();
    let orders = vec![order("WO-1", None), order("WO-12", None), order("WO-123", None)];
    assert_eq!(
        resolved_task(resolve_scan("rack:WO-123-X", catalog, &orders)),
        Some("WO-123")
    );
}

#[test]
fn exact_tiers_beat_containment() {
    let catalog = ArticleCatalog::builtin();
    // 第一条仅满足包含，第二条载荷完全相等
    let orders = vec![order("WO-7", None), order("WO-70", Some("WO-7-HALL"))];
    assert_eq!(
        resolved_task(resolve_scan("wo-7-hall", catalog, &orders)),
        Some("WO-70")
    );
}

#[test]
fn unknown_or_blank_codes_are_not_found() {
    let catalog = ArticleCatalog::builtin();
    let samples = sample_work_orders(Utc::now());
    assert_eq!(
        resolve_scan("ZZ-0000", catalog, &samples),
        ScanResolution::NotFound
    );
    assert_eq!(resolve_scan("   ", catalog, &samples), ScanResolution::NotFound);
    let orders = vec![order("", Some("payload"))];
    assert_eq!(
        resolve_scan("anything", catalog, &orders),
        ScanResolution::NotFound
    );
}

#[test]
fn route_scan_counts_outcomes() {
    let catalog = ArticleCatalog::builtin();
    let before = techassist_telemetry::metrics().snapshot();
    assert!(matches!(
        route_scan("crac", catalog, &[]),
        ScanResolution::Article(_)
    ));
    assert_eq!(route_scan("nothing", catalog, &[]), ScanResolution::NotFound);
    let after = techassist_telemetry::metrics().snapshot();
    assert!(after.qr_scans >= before.qr_scans + 2);
    assert!(after.qr_not_found >= before.qr_not_found + 1);
}
