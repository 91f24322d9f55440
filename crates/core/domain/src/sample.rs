//! 内置示例工单
//!
//! 远端集合为空时用于兜底展示。截止与 SLA 时间相对 `now` 计算；
//! 工单 ID 由任务编号派生，同一 `now` 下两次生成结果完全相等。

use crate::priority::{Priority, Status};
use crate::work_order::{
    ImpactMetrics, SiteLocation, TechnicalRequirements, WorkOrder, WorkOrderCreate,
};
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;
use uuid::Uuid;

const SAMPLE_TECHNICIAN: &str = "Michael Bernando";

/// 示例工单 ID：以任务编号派生的 v5 UUID。
pub fn sample_work_order_id(task_code: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("work-order:{task_code}").as_bytes())
}

fn site(hall: &str, rack: &str, position: &str, code: &str) -> SiteLocation {
    SiteLocation {
        data_hall: Some(hall.to_string()),
        rack_number: Some(rack.to_string()),
        server_position: Some(position.to_string()),
        location_code: Some(code.to_string()),
    }
}

fn impact(users: i64, business: &str, systems: &str) -> ImpactMetrics {
    ImpactMetrics {
        users_affected: Some(users),
        business_impact: Some(business.to_string()),
        systems_affected: Some(systems.to_string()),
    }
}

fn requirements(tools: &str, skills: &str, equipment: &str) -> TechnicalRequirements {
    TechnicalRequirements {
        required_tools: Some(tools.to_string()),
        skills_needed: Some(skills.to_string()),
        equipment: Some(equipment.to_string()),
    }
}

fn sample(task_code: &str, now: DateTime<Utc>, create: WorkOrderCreate) -> WorkOrder {
    WorkOrder::new(WorkOrderCreate {
        id: Some(sample_work_order_id(task_code)),
        task_code: task_code.to_string(),
        assigned_technician: SAMPLE_TECHNICIAN.to_string(),
        created_at: Some(now),
        ..create
    })
}

/// 生成 7 条示例工单（顺序固定）。
pub fn sample_work_orders(now: DateTime<Utc>) -> Vec<WorkOrder> {
    vec![
        sample(
            "WO-8472",
            now,
            WorkOrderCreate {
                title: "Replace failed PSU in Rack A12".to_string(),
                description: "Server shutting down due to PSU failure".to_string(),
                priority: Priority::Critical,
                status: Status::InProgress,
                due_at: Some(now),
                sla_breach_at: Some(now + TimeDelta::minutes(15)),
                time_spent: Duration::from_secs(600),
                time_estimate: Some("45 minutes".to_string()),
                location: "Data Center - Hall B, Rack A12".to_string(),
                site: site("Hall B", "A12", "U24", "B-A12-U24"),
                impact: impact(2500, "$4,800/hour downtime", "Customer XYZ Database"),
                requirements: requirements(
                    "PSU-750W-DELL, ESD strap",
                    "HV Certified",
                    "Server U24 - PSU Unit",
                ),
                qr_code_data: Some("WO-8472-B-A12-U24".to_string()),
                ..Default::default()
            },
        ),
        sample(
            "WO-9123",
            now,
            WorkOrderCreate {
                title: "Cooling System Failure - CRAC Unit".to_string(),
                description: "Temperature spike detected. Risk of hardware damage if not addressed immediately.".to_string(),
                priority: Priority::Critical,
                status: Status::Pending,
                due_at: Some(now),
                sla_breach_at: Some(now + TimeDelta::minutes(10)),
                time_estimate: Some("30 minutes".to_string()),
                location: "Data Center - Cooling Zone A".to_string(),
                site: site("Hall A", "N/A", "N/A", "A-CRAC-5"),
                impact: impact(5000, "$12,000/hour downtime", "All systems in Hall A"),
                requirements: requirements(
                    "Multimeter, Refrigerant gauge",
                    "HVAC Certified",
                    "CRAC Unit #5",
                ),
                qr_code_data: Some("WO-9123-A-CRAC-5".to_string()),
                ..Default::default()
            },
        ),
        sample(
            "WO-7891",
            now,
            WorkOrderCreate {
                title: "Network Backbone Failure".to_string(),
                description: "Core router failure affecting multiple customers. Service degradation reported.".to_string(),
                priority: Priority::High,
                status: Status::Pending,
                due_at: Some(now + TimeDelta::hours(1)),
                sla_breach_at: Some(now + TimeDelta::hours(1)),
                time_estimate: Some("1 hour".to_string()),
                location: "Network Room - Main".to_string(),
                site: site("Hall C", "C05", "U42", "C-C05-U42"),
                impact: impact(15000, "$25,000/hour downtime", "Core Network Infrastructure"),
                requirements: requirements(
                    "Console cable, Replacement router",
                    "Network Certified",
                    "Core Router #1",
                ),
                qr_code_data: Some("WO-7891-C-C05-U42".to_string()),
                ..Default::default()
            },
        ),
        sample(
            "WO-6543",
            now,
            WorkOrderCreate {
                title: "Hardware Refresh - Server Rack 8".to_string(),
                description: "Planned upgrade of servers in rack 8. Schedule during maintenance window.".to_string(),
                priority: Priority::Medium,
                status: Status::Pending,
                due_at: Some(now + TimeDelta::days(1)),
                sla_breach_at: Some(now + TimeDelta::days(1)),
                time_estimate: Some("4 hours".to_string()),
                location: "Data Center - Rack 8".to_string(),
                site: site("Hall B", "B08", "U1-U42", "B-B08-FULL"),
                impact: impact(0, "Planned maintenance", "Server Array #8"),
                requirements: requirements(
                    "Server lift, ESD equipment",
                    "Server Hardware Certified",
                    "Server Array #8",
                ),
                qr_code_data: Some("WO-6543-B-B08".to_string()),
                ..Default::default()
            },
        ),
        sample(
            "WO-5234",
            now,
            WorkOrderCreate {
                title: "Preventive Maintenance - Battery Testing".to_string(),
                description: "Routine UPS battery testing and replacement if needed.".to_string(),
                priority: Priority::Medium,
                status: Status::Pending,
                due_at: Some(now + TimeDelta::days(2)),
                sla_breach_at: Some(now + TimeDelta::days(2)),
                time_estimate: Some("2 hours".to_string()),
                location: "UPS Room - Main".to_string(),
                site: site("Hall A", "N/A", "N/A", "A-UPS-3"),
                impact: impact(0, "Preventive maintenance", "UPS System #3"),
                requirements: requirements(
                    "Battery tester, Multimeter",
                    "Electrical Certified",
                    "UPS System #3",
                ),
                qr_code_data: Some("WO-5234-A-UPS-3".to_string()),
                ..Default::default()
            },
        ),
        sample(
            "WO-4123",
            now,
            WorkOrderCreate {
                title: "Rack Cleaning and Organization".to_string(),
                description: "General cleaning and cable management in rack 15.".to_string(),
                priority: Priority::Low,
                status: Status::Pending,
                time_estimate: Some("1 hour".to_string()),
                location: "Data Center - Rack 15".to_string(),
                site: site("Hall C", "C15", "N/A", "C-C15"),
                impact: impact(0, "No impact", "N/A"),
                requirements: requirements(
                    "Cleaning supplies, Cable ties",
                    "General maintenance",
                    "Rack C15",
                ),
                qr_code_data: Some("WO-4123-C-C15".to_string()),
                ..Default::default()
            },
        ),
        sample(
            "WO-3456",
            now,
            WorkOrderCreate {
                title: "Documentation Update".to_string(),
                description: "Update network diagrams and equipment inventory.".to_string(),
                priority: Priority::Low,
                status: Status::Completed,
                time_spent: Duration::from_secs(1800),
                time_estimate: Some("30 minutes".to_string()),
                location: "Office - Documentation".to_string(),
                qr_code_data: Some("WO-3456".to_string()),
                ..Default::default()
            },
        ),
    ]
}
