//! 扫描内容解析
//!
//! 匹配顺序（先命中者生效）：
//! 1. 文章短码，大小写不敏感完全相等
//! 2. 工单二维码载荷相等
//! 3. 工单任务编号相等
//! 4. 扫描内容包含任务编号；多条命中时取任务编号最长者
//!
//! 比较前去掉首尾空白并统一小写；同一层级内按集合顺序取第一条。

use domain::{ArticleCatalog, TroubleshootingArticle, WorkOrder};
use tracing::{info, warn};

/// 未找到时展示给用户的提示。
pub const NOT_FOUND_MESSAGE: &str =
    "No work order or troubleshooting article found matching the scanned QR code.";

/// 解析结果（借用目录与工单集合）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanResolution<'a> {
    Article(&'a TroubleshootingArticle),
    WorkOrder(&'a WorkOrder),
    NotFound,
}

/// 解析扫描内容。
pub fn resolve_scan<'a>(
    code: &str,
    catalog: &'a ArticleCatalog,
    work_orders: &'a [WorkOrder],
) -> ScanResolution<'a> {
    let code = code.trim();
    if code.is_empty() {
        return ScanResolution::NotFound;
    }
    if let Some(article) = catalog.find_by_qr_code_id(code) {
        return ScanResolution::Article(article);
    }

    let needle = code.to_lowercase();
    if let Some(order) = work_orders
        .iter()
        .find(|order| order.qr_code_data().to_lowercase() == needle)
    {
        return ScanResolution::WorkOrder(order);
    }
    if let Some(order) = work_orders
        .iter()
        .find(|order| order.task_code.to_lowercase() == needle)
    {
        return ScanResolution::WorkOrder(order);
    }

    let mut best: Option<&WorkOrder> = None;
    for order in work_orders {
        let task_code = order.task_code.to_lowercase();
        if task_code.is_empty() || !needle.contains(&task_code) {
            continue;
        }
        if best.is_none_or(|current| order.task_code.len() > current.task_code.len()) {
            best = Some(order);
        }
    }
    best.map_or(ScanResolution::NotFound, ScanResolution::WorkOrder)
}

/// 解析并记录结果（日志 + 计数器）。
pub fn route_scan<'a>(
    code: &str,
    catalog: &'a ArticleCatalog,
    work_orders: &'a [WorkOrder],
) -> ScanResolution<'a> {
    techassist_telemetry::record_qr_scan();
    let resolution = resolve_scan(code, catalog, work_orders);
    match resolution {
        ScanResolution::Article(article) => {
            techassist_telemetry::record_qr_article_hit();
            info!(code, qr_code_id = %article.qr_code_id, "scan resolved to article");
        }
        ScanResolution::WorkOrder(order) => {
            techassist_telemetry::record_qr_work_order_hit();
            info!(code, task_code = %order.task_code, "scan resolved to work order");
        }
        ScanResolution::NotFound => {
            techassist_telemetry::record_qr_not_found();
            warn!(code, "scan matched nothing");
        }
    }
    resolution
}
