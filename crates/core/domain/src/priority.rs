//! 工单优先级与状态
//!
//! 优先级与状态都是封闭枚举，本身不携带行为。
//! 展示文案、排序权重、响应时限等属性放在外部静态表里，
//! 通过 [`priority_info`] / [`status_info`] 查表获取。

use std::fmt;
use std::str::FromStr;

/// 工单优先级（固定顺序：critical < high < medium < low）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

/// 工单状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
    OnHold,
}

/// 优先级属性表项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityInfo {
    pub priority: Priority,
    /// 记录中保存的原始取值
    pub token: &'static str,
    pub label: &'static str,
    /// 排序权重，越小越紧急
    pub rank: u8,
    pub response_time: &'static str,
}

/// 状态属性表项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    pub status: Status,
    pub token: &'static str,
}

/// 优先级静态表，按 rank 升序排列。
pub const PRIORITY_TABLE: [PriorityInfo; 4] = [
    PriorityInfo {
        priority: Priority::Critical,
        token: "CRITICAL",
        label: "🚨 CRITICAL",
        rank: 0,
        response_time: "0-15 min",
    },
    PriorityInfo {
        priority: Priority::High,
        token: "HIGH",
        label: "HIGH",
        rank: 1,
        response_time: "Under 1 hour",
    },
    PriorityInfo {
        priority: Priority::Medium,
        token: "MEDIUM",
        label: "MEDIUM",
        rank: 2,
        response_time: "2-8 hours",
    },
    PriorityInfo {
        priority: Priority::Low,
        token: "LOW",
        label: "LOW",
        rank: 3,
        response_time: "When available",
    },
];

/// 状态静态表。
pub const STATUS_TABLE: [StatusInfo; 4] = [
    StatusInfo {
        status: Status::Pending,
        token: "Pending",
    },
    StatusInfo {
        status: Status::InProgress,
        token: "In Progress",
    },
    StatusInfo {
        status: Status::Completed,
        token: "Completed",
    },
    StatusInfo {
        status: Status::OnHold,
        token: "On Hold",
    },
];

/// 按 rank 顺序列出全部优先级。
pub const PRIORITIES: [Priority; 4] = [
    Priority::Critical,
    Priority::High,
    Priority::Medium,
    Priority::Low,
];

/// 查询优先级属性。
pub fn priority_info(priority: Priority) -> &'static PriorityInfo {
    match priority {
        Priority::Critical => &PRIORITY_TABLE[0],
        Priority::High => &PRIORITY_TABLE[1],
        Priority::Medium => &PRIORITY_TABLE[2],
        Priority::Low => &PRIORITY_TABLE[3],
    }
}

/// 查询状态属性。
pub fn status_info(status: Status) -> &'static StatusInfo {
    match status {
        Status::Pending => &STATUS_TABLE[0],
        Status::InProgress => &STATUS_TABLE[1],
        Status::Completed => &STATUS_TABLE[2],
        Status::OnHold => &STATUS_TABLE[3],
    }
}

/// 未识别的枚举取值。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} token: {token}")]
pub struct UnknownToken {
    pub kind: &'static str,
    pub token: String,
}

impl FromStr for Priority {
    type Err = UnknownToken;

    /// 原始取值必须与表中 token 完全一致（区分大小写）。
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PRIORITY_TABLE
            .iter()
            .find(|info| info.token == value)
            .map(|info| info.priority)
            .ok_or_else(|| UnknownToken {
                kind: "priority",
                token: value.to_string(),
            })
    }
}

impl FromStr for Status {
    type Err = UnknownToken;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        STATUS_TABLE
            .iter()
            .find(|info| info.token == value)
            .map(|info| info.status)
            .ok_or_else(|| UnknownToken {
                kind: "status",
                token: value.to_string(),
            })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(priority_info(*self).token)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(status_info(*self).token)
    }
}
