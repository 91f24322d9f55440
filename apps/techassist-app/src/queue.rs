//! 优先级队列条目（严重 / 高优先级榜单的展示数据）。

use chrono::{DateTime, TimeZone, Utc};
use domain::{Priority, WorkOrder, priority_info, status_info};
use techassist_ranking::{priority_leaderboard, top_critical};

/// 顶部紧急条目数量。
pub const TOP_PRIORITY_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub task_code: String,
    pub title: String,
    pub location: String,
    pub priority_label: &'static str,
    pub response_time: &'static str,
    pub status: &'static str,
    pub sla: Option<String>,
    pub due: Option<String>,
}

impl QueueEntry {
    pub fn new<Tz: TimeZone>(order: &WorkOrder, now: DateTime<Utc>, tz: &Tz) -> Self {
        let info = priority_info(order.priority);
        Self {
            task_code: order.task_code.clone(),
            title: order.title.clone(),
            location: order.location.clone(),
            priority_label: info.label,
            response_time: info.response_time,
            status: status_info(order.status).token,
            sla: order.sla_countdown(now),
            due: order.due_date_display_in(now, tz),
        }
    }
}

/// 指定优先级的队列。
pub fn priority_queue<Tz: TimeZone>(
    orders: &[WorkOrder],
    priority: Priority,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<QueueEntry> {
    priority_leaderboard(orders, priority)
        .into_iter()
        .map(|order| QueueEntry::new(order, now, tz))
        .collect()
}

/// 顶部紧急条目（严重榜单前三）。
pub fn top_priority_entries<Tz: TimeZone>(
    orders: &[WorkOrder],
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<QueueEntry> {
    top_critical(orders, TOP_PRIORITY_LIMIT)
        .into_iter()
        .map(|order| QueueEntry::new(order, now, tz))
        .collect()
}
