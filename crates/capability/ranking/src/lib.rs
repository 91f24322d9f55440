//! 工单排序与派生状态。
//!
//! 全部是输入集合与当前时间的纯函数：不修改输入，空集合得到空结果或 0。
//! 包含：
//! - 计数：未完成数、按优先级计数、今日完成数
//! - 主排序：未完成工单按紧急程度排序
//! - 按优先级分组、优先级榜单、仪表盘指标

use chrono::{DateTime, TimeZone, Utc};
use domain::{PRIORITIES, Priority, Status, WorkOrder, calendar_day, priority_info};
use std::cmp::Ordering;

/// 优先级分组（组内保持主排序顺序）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityGroup<'a> {
    pub priority: Priority,
    pub work_orders: Vec<&'a WorkOrder>,
}

impl PriorityGroup<'_> {
    pub fn is_empty(&self) -> bool {
        self.work_orders.is_empty()
    }
}

/// 仪表盘指标。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub open: usize,
    pub critical: usize,
    pub high: usize,
    pub completed_today: usize,
}

/// 未完成工单数。
pub fn open_count(orders: &[WorkOrder]) -> usize {
    orders.iter().filter(|order| order.is_open()).count()
}

/// 指定优先级的未完成工单数。
pub fn count_by_priority(orders: &[WorkOrder], priority: Priority) -> usize {
    orders
        .iter()
        .filter(|order| order.is_open() && order.priority == priority)
        .count()
}

/// 每个优先级的未完成工单数（按优先级顺序）。
pub fn priority_counts(orders: &[WorkOrder]) -> [(Priority, usize); 4] {
    PRIORITIES.map(|priority| (priority, count_by_priority(orders, priority)))
}

/// 今日完成数。
///
/// 以创建时间所在日历日判断：昨天创建、今天完成的工单不计入。
pub fn completed_today<Tz: TimeZone>(orders: &[WorkOrder], now: DateTime<Utc>, tz: &Tz) -> usize {
    let today = calendar_day(now, tz);
    orders
        .iter()
        .filter(|order| {
            order.status == Status::Completed && calendar_day(order.created_at, tz) == today
        })
        .count()
}

/// 紧急程度比较（全序）。
///
/// 键依次为：优先级序号、有截止日期者在前、截止日期升序、创建时间升序。
pub fn compare_urgency(a: &WorkOrder, b: &WorkOrder) -> Ordering {
    let rank = |order: &WorkOrder| priority_info(order.priority).rank;
    rank(a)
        .cmp(&rank(b))
        .then_with(|| compare_due(a.due_at, b.due_at))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// 主排序列表：过滤已完成，按紧急程度排序。
pub fn sorted_active(orders: &[WorkOrder]) -> Vec<&WorkOrder> {
    let mut active: Vec<&WorkOrder> = orders.iter().filter(|order| order.is_open()).collect();
    active.sort_by(|a, b| compare_urgency(a, b));
    active
}

/// 按优先级分组，总是返回四组（可能为空）。
pub fn grouped_by_priority(orders: &[WorkOrder]) -> Vec<PriorityGroup<'_>> {
    let sorted = sorted_active(orders);
    PRIORITIES
        .iter()
        .map(|priority| PriorityGroup {
            priority: *priority,
            work_orders: sorted
                .iter()
                .copied()
                .filter(|order| order.priority == *priority)
                .collect(),
        })
        .collect()
}

/// 优先级榜单：指定优先级的未完成工单，截止日期升序，无截止日期排最后。
pub fn priority_leaderboard(orders: &[WorkOrder], priority: Priority) -> Vec<&WorkOrder> {
    let mut board: Vec<&WorkOrder> = orders
        .iter()
        .filter(|order| order.is_open() && order.priority == priority)
        .collect();
    board.sort_by(|a, b| compare_due(a.due_at, b.due_at));
    board
}

/// 最紧急的前 `limit` 条严重工单。
pub fn top_critical(orders: &[WorkOrder], limit: usize) -> Vec<&WorkOrder> {
    let mut board = priority_leaderboard(orders, Priority::Critical);
    board.truncate(limit);
    board
}

/// 仪表盘指标快照。
pub fn dashboard_metrics<Tz: TimeZone>(
    orders: &[WorkOrder],
    now: DateTime<Utc>,
    tz: &Tz,
) -> DashboardMetrics {
    DashboardMetrics {
        open: open_count(orders),
        critical: count_by_priority(orders, Priority::Critical),
        high: count_by_priority(orders, Priority::High),
        completed_today: completed_today(orders, now, tz),
    }
}

/// 截止日期升序，缺失视为无限远。
fn compare_due(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
