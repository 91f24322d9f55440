//! 稳定的文档记录契约。
//!
//! 远端文档库中每条工单是一张扁平键值表：
//! - 标量字段直接存储，可选字段缺省时整体省略（不写 null）
//! - 所有时间字段使用文档库原生时间戳类型
//!
//! 编解码都是纯函数。解码缺少必填字段或枚举取值未知时返回错误，
//! 不会产出半填充的工单。

mod codec;
mod record;

pub use codec::{DecodeError, DecodedSnapshot, decode_snapshot, decode_work_order, encode_work_order};
pub use record::{DocumentRecord, FieldValue};

/// 工单记录字段名。
pub mod fields {
    pub const ID: &str = "id";
    pub const TASK_ID: &str = "taskID";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const PRIORITY: &str = "priority";
    pub const STATUS: &str = "status";
    pub const ASSIGNED_TECHNICIAN: &str = "assignedTechnician";
    pub const ASSIGNED_TECHNICIAN_ID: &str = "assignedTechnicianId";
    pub const CREATED_AT: &str = "createdAt";
    pub const DUE_DATE: &str = "dueDate";
    pub const SLA_BREACH_DATE: &str = "slaBreachDate";
    pub const TIME_SPENT: &str = "timeSpent";
    pub const TIME_ESTIMATE: &str = "timeEstimate";
    pub const LOCATION: &str = "location";
    pub const DATA_HALL: &str = "dataHall";
    pub const RACK_NUMBER: &str = "rackNumber";
    pub const SERVER_POSITION: &str = "serverPosition";
    pub const LOCATION_CODE: &str = "locationCode";
    pub const USERS_AFFECTED: &str = "usersAffected";
    pub const BUSINESS_IMPACT: &str = "businessImpact";
    pub const SYSTEMS_AFFECTED: &str = "systemsAffected";
    pub const REQUIRED_TOOLS: &str = "requiredTools";
    pub const SKILLS_NEEDED: &str = "skillsNeeded";
    pub const EQUIPMENT: &str = "equipment";
    pub const QR_CODE_DATA: &str = "qrCodeData";
}
