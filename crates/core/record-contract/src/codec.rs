//! WorkOrder <-> DocumentRecord 编解码
//!
//! 必填：id、title、description、priority、status、assignedTechnician、location。
//! 回退规则：
//! - taskID 缺失时使用文档 ID
//! - createdAt 缺失时使用解码时刻
//! - timeSpent 缺失、为负或非有限值时为 0
//! - qrCodeData 缺失时由领域模型回退为任务编号

use crate::fields;
use crate::record::{DocumentRecord, FieldValue};
use chrono::{DateTime, Utc};
use domain::{
    ImpactMetrics, Priority, SiteLocation, Status, TechnicalRequirements, WorkOrder,
    WorkOrderCreate, priority_info, status_info,
};
use std::time::Duration;
use uuid::Uuid;

/// 记录解码错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("unknown priority: {0}")]
    UnknownPriority(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

/// 将工单编码为文档记录（文档 ID 即工单 ID）。
pub fn encode_work_order(order: &WorkOrder) -> DocumentRecord {
    let id = order.id().to_string();
    let mut record = DocumentRecord::new(id.clone());
    record.set(fields::ID, FieldValue::StringValue(id));
    record.set(
        fields::TASK_ID,
        FieldValue::StringValue(order.task_code.clone()),
    );
    record.set(fields::TITLE, FieldValue::StringValue(order.title.clone()));
    record.set(
        fields::DESCRIPTION,
        FieldValue::StringValue(order.description.clone()),
    );
    record.set(
        fields::PRIORITY,
        FieldValue::StringValue(priority_info(order.priority).token.to_string()),
    );
    record.set(
        fields::STATUS,
        FieldValue::StringValue(status_info(order.status).token.to_string()),
    );
    record.set(
        fields::ASSIGNED_TECHNICIAN,
        FieldValue::StringValue(order.assigned_technician.clone()),
    );
    record.set(fields::CREATED_AT, FieldValue::TimestampValue(order.created_at));
    record.set(
        fields::TIME_SPENT,
        FieldValue::DoubleValue(order.time_spent().as_secs_f64()),
    );
    record.set(
        fields::LOCATION,
        FieldValue::StringValue(order.location.clone()),
    );
    record.set(
        fields::QR_CODE_DATA,
        FieldValue::StringValue(order.qr_code_data().to_string()),
    );

    record.set_opt_str(
        fields::ASSIGNED_TECHNICIAN_ID,
        order.assigned_technician_id.as_deref(),
    );
    record.set_opt_timestamp(fields::DUE_DATE, order.due_at);
    record.set_opt_timestamp(fields::SLA_BREACH_DATE, order.sla_breach_at);
    record.set_opt_str(fields::TIME_ESTIMATE, order.time_estimate.as_deref());

    record.set_opt_str(fields::DATA_HALL, order.site.data_hall.as_deref());
    record.set_opt_str(fields::RACK_NUMBER, order.site.rack_number.as_deref());
    record.set_opt_str(
        fields::SERVER_POSITION,
        order.site.server_position.as_deref(),
    );
    record.set_opt_str(fields::LOCATION_CODE, order.site.location_code.as_deref());

    if let Some(users) = order.impact.users_affected {
        record.set(fields::USERS_AFFECTED, FieldValue::IntegerValue(users));
    }
    record.set_opt_str(
        fields::BUSINESS_IMPACT,
        order.impact.business_impact.as_deref(),
    );
    record.set_opt_str(
        fields::SYSTEMS_AFFECTED,
        order.impact.systems_affected.as_deref(),
    );

    record.set_opt_str(
        fields::REQUIRED_TOOLS,
        order.requirements.required_tools.as_deref(),
    );
    record.set_opt_str(
        fields::SKILLS_NEEDED,
        order.requirements.skills_needed.as_deref(),
    );
    record.set_opt_str(fields::EQUIPMENT, order.requirements.equipment.as_deref());
    record
}

/// 将文档记录解码为工单。
pub fn decode_work_order(
    record: &DocumentRecord,
    now: DateTime<Utc>,
) -> Result<WorkOrder, DecodeError> {
    let id_raw = required_str(record, fields::ID)?;
    let id = Uuid::parse_str(id_raw).map_err(|_| DecodeError::InvalidId(id_raw.to_string()))?;
    let title = required_str(record, fields::TITLE)?;
    let description = required_str(record, fields::DESCRIPTION)?;
    let priority_raw = required_str(record, fields::PRIORITY)?;
    let priority = priority_raw
        .parse::<Priority>()
        .map_err(|_| DecodeError::UnknownPriority(priority_raw.to_string()))?;
    let status_raw = required_str(record, fields::STATUS)?;
    let status = status_raw
        .parse::<Status>()
        .map_err(|_| DecodeError::UnknownStatus(status_raw.to_string()))?;
    let assigned_technician = required_str(record, fields::ASSIGNED_TECHNICIAN)?;
    let location = required_str(record, fields::LOCATION)?;

    let task_code = record
        .get_str(fields::TASK_ID)
        .unwrap_or(&record.document_id);
    let time_spent = record
        .get_f64(fields::TIME_SPENT)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or_default();

    Ok(WorkOrder::new(WorkOrderCreate {
        id: Some(id),
        task_code: task_code.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority,
        status,
        assigned_technician: assigned_technician.to_string(),
        assigned_technician_id: optional_string(record, fields::ASSIGNED_TECHNICIAN_ID),
        created_at: Some(record.get_timestamp(fields::CREATED_AT).unwrap_or(now)),
        due_at: record.get_timestamp(fields::DUE_DATE),
        sla_breach_at: record.get_timestamp(fields::SLA_BREACH_DATE),
        time_spent,
        time_estimate: optional_string(record, fields::TIME_ESTIMATE),
        location: location.to_string(),
        site: SiteLocation {
            data_hall: optional_string(record, fields::DATA_HALL),
            rack_number: optional_string(record, fields::RACK_NUMBER),
            server_position: optional_string(record, fields::SERVER_POSITION),
            location_code: optional_string(record, fields::LOCATION_CODE),
        },
        impact: ImpactMetrics {
            users_affected: record.get_i64(fields::USERS_AFFECTED),
            business_impact: optional_string(record, fields::BUSINESS_IMPACT),
            systems_affected: optional_string(record, fields::SYSTEMS_AFFECTED),
        },
        requirements: TechnicalRequirements {
            required_tools: optional_string(record, fields::REQUIRED_TOOLS),
            skills_needed: optional_string(record, fields::SKILLS_NEEDED),
            equipment: optional_string(record, fields::EQUIPMENT),
        },
        qr_code_data: optional_string(record, fields::QR_CODE_DATA),
    }))
}

/// 批量解码结果：成功的工单（保持原顺序）与被拒绝的记录。
#[derive(Debug, Clone, Default)]
pub struct DecodedSnapshot {
    pub work_orders: Vec<WorkOrder>,
    pub rejected: Vec<(String, DecodeError)>,
}

/// 解码一次快照；单条坏记录不影响其余记录。
pub fn decode_snapshot(records: &[DocumentRecord], now: DateTime<Utc>) -> DecodedSnapshot {
    let mut snapshot = DecodedSnapshot::default();
    for record in records {
        match decode_work_order(record, now) {
            Ok(order) => snapshot.work_orders.push(order),
            Err(err) => snapshot.rejected.push((record.document_id.clone(), err)),
        }
    }
    snapshot
}

fn required_str<'a>(record: &'a DocumentRecord, key: &'static str) -> Result<&'a str, DecodeError> {
    record.get_str(key).ok_or(DecodeError::MissingField(key))
}

fn optional_string(record: &DocumentRecord, key: &str) -> Option<String> {
    record.get_str(key).map(str::to_string)
}
