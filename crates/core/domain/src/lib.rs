//! 现场工单领域模型：工单、故障排查文章、优先级/状态表与内置数据。

pub mod article;
pub mod priority;
pub mod sample;
pub mod work_order;

pub use article::{ArticleCatalog, TroubleshootingArticle, article_id};
pub use priority::{
    PRIORITIES, PRIORITY_TABLE, Priority, PriorityInfo, STATUS_TABLE, Status, StatusInfo,
    UnknownToken, priority_info, status_info,
};
pub use sample::{sample_work_order_id, sample_work_orders};
pub use work_order::{
    ImpactMetrics, SLA_BREACHED, SiteLocation, TechnicalRequirements, WorkOrder, WorkOrderCreate,
    calendar_day,
};
