//! 仪表盘视图模型
//!
//! 数据源是快照镜像；实时集合为空时展示示例工单。每次渲染都从当前快照
//! 重新计算，不缓存派生结果。

use crate::queue::{QueueEntry, top_priority_entries};
use crate::session::SessionViewModel;
use chrono::{DateTime, TimeZone, Utc};
use domain::{ArticleCatalog, Priority, TroubleshootingArticle, WorkOrder};
use std::sync::Arc;
use techassist_lookup::{NOT_FOUND_MESSAGE, ScanResolution, route_scan};
use techassist_ranking::{DashboardMetrics, dashboard_metrics, grouped_by_priority, sorted_active};
use techassist_storage::WorkOrderMirror;

/// 扫描后的跳转目标。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    Article(TroubleshootingArticle),
    WorkOrder(WorkOrder),
    NotFound { message: &'static str },
}

/// 一次渲染所需的全部数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub technician_name: String,
    pub initials: String,
    pub metrics: DashboardMetrics,
    /// 未完成工单，按紧急程度排序
    pub tasks: Vec<WorkOrder>,
    pub top_priority: Vec<QueueEntry>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

pub struct DashboardViewModel {
    mirror: Arc<WorkOrderMirror>,
    session: Arc<SessionViewModel>,
    catalog: &'static ArticleCatalog,
}

impl DashboardViewModel {
    pub fn new(
        mirror: Arc<WorkOrderMirror>,
        session: Arc<SessionViewModel>,
        catalog: &'static ArticleCatalog,
    ) -> Self {
        Self {
            mirror,
            session,
            catalog,
        }
    }

    pub fn work_orders(&self, now: DateTime<Utc>) -> Vec<WorkOrder> {
        self.mirror.visible_work_orders(now)
    }

    pub fn render<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> DashboardView {
        // 单次读取快照，列表、指标与加载状态来自同一修订
        let state = self.mirror.snapshot();
        let orders = self.mirror.visible_in(&state, now);
        DashboardView {
            technician_name: self.session.technician_name(),
            initials: self.session.initials(),
            metrics: dashboard_metrics(&orders, now, tz),
            tasks: sorted_active(&orders).into_iter().cloned().collect(),
            top_priority: top_priority_entries(&orders, now, tz),
            is_loading: state.is_loading,
            error_message: state.error_message,
        }
    }

    /// 工单列表页：四个优先级分组。
    pub fn grouped(&self, now: DateTime<Utc>) -> Vec<(Priority, Vec<WorkOrder>)> {
        let orders = self.work_orders(now);
        grouped_by_priority(&orders)
            .into_iter()
            .map(|group| {
                (
                    group.priority,
                    group.work_orders.into_iter().cloned().collect(),
                )
            })
            .collect()
    }

    /// 处理扫描结果：文章优先，其次工单，否则给出提示。
    pub fn handle_scanned_code(&self, code: &str, now: DateTime<Utc>) -> ScanTarget {
        let orders = self.work_orders(now);
        match route_scan(code, self.catalog, &orders) {
            ScanResolution::Article(article) => ScanTarget::Article(article.clone()),
            ScanResolution::WorkOrder(order) => ScanTarget::WorkOrder(order.clone()),
            ScanResolution::NotFound => ScanTarget::NotFound {
                message: NOT_FOUND_MESSAGE,
            },
        }
    }
}
