//! 工单模型
//!
//! 工单是一条可服务的现场任务。标识在创建后不可变；
//! `qr_code_data` 在构造后永不为空（缺省回退为任务编号）；
//! 累计耗时使用 `Duration`，天然非负且只增不减。

use crate::priority::{Priority, Status};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::time::Duration;
use uuid::Uuid;

/// SLA 已违约时的固定文案。
pub const SLA_BREACHED: &str = "SLA BREACHED";

/// 结构化位置（机房、机柜、机位、组合位置码）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteLocation {
    /// 例如 "Hall B"
    pub data_hall: Option<String>,
    /// 例如 "A12"
    pub rack_number: Option<String>,
    /// 例如 "U24"
    pub server_position: Option<String>,
    /// 例如 "B-A12-U24"
    pub location_code: Option<String>,
}

/// 影响范围。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImpactMetrics {
    pub users_affected: Option<i64>,
    /// 例如 "$4,800/hour downtime"
    pub business_impact: Option<String>,
    pub systems_affected: Option<String>,
}

/// 技术要求。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TechnicalRequirements {
    pub required_tools: Option<String>,
    pub skills_needed: Option<String>,
    pub equipment: Option<String>,
}

/// 工单创建输入。
///
/// `id` / `created_at` 为空时分别生成随机 UUID 与当前时间；
/// `qr_code_data` 为空（或空串）时回退为 `task_code`。
#[derive(Debug, Clone, Default)]
pub struct WorkOrderCreate {
    pub id: Option<Uuid>,
    pub task_code: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub assigned_technician: String,
    pub assigned_technician_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub sla_breach_at: Option<DateTime<Utc>>,
    pub time_spent: Duration,
    pub time_estimate: Option<String>,
    pub location: String,
    pub site: SiteLocation,
    pub impact: ImpactMetrics,
    pub requirements: TechnicalRequirements,
    pub qr_code_data: Option<String>,
}

/// 工单。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOrder {
    id: Uuid,
    /// 人类可读任务编号，例如 "WO-8472"
    pub task_code: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub assigned_technician: String,
    /// 订阅过滤用的技术员 ID（可选）
    pub assigned_technician_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub due_at: Option<DateTime<Utc>>,
    pub sla_breach_at: Option<DateTime<Utc>>,
    time_spent: Duration,
    /// 例如 "45 minutes"
    pub time_estimate: Option<String>,
    /// 位置描述（必填）
    pub location: String,
    pub site: SiteLocation,
    pub impact: ImpactMetrics,
    pub requirements: TechnicalRequirements,
    qr_code_data: String,
}

impl WorkOrder {
    /// 由创建输入构造工单。
    pub fn new(create: WorkOrderCreate) -> Self {
        let qr_code_data = non_empty_or(create.qr_code_data, &create.task_code);
        Self {
            id: create.id.unwrap_or_else(Uuid::new_v4),
            task_code: create.task_code,
            title: create.title,
            description: create.description,
            priority: create.priority,
            status: create.status,
            assigned_technician: create.assigned_technician,
            assigned_technician_id: create.assigned_technician_id,
            created_at: create.created_at.unwrap_or_else(Utc::now),
            due_at: create.due_at,
            sla_breach_at: create.sla_breach_at,
            time_spent: create.time_spent,
            time_estimate: create.time_estimate,
            location: create.location,
            site: create.site,
            impact: create.impact,
            requirements: create.requirements,
            qr_code_data,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn time_spent(&self) -> Duration {
        self.time_spent
    }

    /// 二维码载荷，永不为空。
    pub fn qr_code_data(&self) -> &str {
        &self.qr_code_data
    }

    /// 替换二维码载荷；空值回退为任务编号。
    pub fn set_qr_code_data(&mut self, value: Option<String>) {
        self.qr_code_data = non_empty_or(value, &self.task_code);
    }

    /// 累加耗时（饱和加法）。
    pub fn add_time_spent(&mut self, elapsed: Duration) {
        self.time_spent = self.time_spent.saturating_add(elapsed);
    }

    pub fn is_open(&self) -> bool {
        self.status != Status::Completed
    }

    /// SLA 倒计时文案。
    ///
    /// - 未设置 SLA 时间：`None`
    /// - `now >= sla`：`"SLA BREACHED"`
    /// - 剩余不少于 1 小时：`"{h}h {m}m until breach"`
    /// - 否则：`"{m}m until breach"`
    ///
    /// 小时与分钟由剩余整秒数整除/取模得到。
    pub fn sla_countdown(&self, now: DateTime<Utc>) -> Option<String> {
        let sla = self.sla_breach_at?;
        if now >= sla {
            return Some(SLA_BREACHED.to_string());
        }
        let remaining = (sla - now).num_seconds();
        let hours = remaining / 3600;
        let minutes = (remaining % 3600) / 60;
        if hours > 0 {
            Some(format!("{hours}h {minutes}m until breach"))
        } else {
            Some(format!("{minutes}m until breach"))
        }
    }

    /// 截止日期文案（本地时区日历日）。
    pub fn due_date_display(&self, now: DateTime<Utc>) -> Option<String> {
        self.due_date_display_in(now, &Local)
    }

    /// 截止日期文案：`"Due Today"` / `"Due Tomorrow"` / `"Due M/D/YY"`。
    pub fn due_date_display_in<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Option<String> {
        let due = calendar_day(self.due_at?, tz);
        let today = calendar_day(now, tz);
        if due == today {
            return Some("Due Today".to_string());
        }
        if today.succ_opt() == Some(due) {
            return Some("Due Tomorrow".to_string());
        }
        Some(format!("Due {}", due.format("%-m/%-d/%y")))
    }
}

/// 时间点在指定时区下的日历日。
pub fn calendar_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => fallback.to_string(),
    }
}
