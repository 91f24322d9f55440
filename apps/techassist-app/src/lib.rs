//! TechAssist 无界面宿主：视图模型与组件接线。
//!
//! - `dashboard`：仪表盘（指标、主排序列表、二维码跳转）
//! - `session`：会话视图模型（订阅认证事件）
//! - `queue`：优先级队列条目
//! - `search`：文章搜索
//! - `wiring`：由配置构造各组件

pub mod dashboard;
pub mod queue;
pub mod search;
pub mod session;
pub mod wiring;

pub use dashboard::{DashboardView, DashboardViewModel, ScanTarget};
pub use queue::{QueueEntry, priority_queue, top_priority_entries};
pub use search::ArticleSearch;
pub use session::{SessionView, SessionViewModel};
pub use wiring::{UnconfiguredProvider, auth_service, authorize_request, work_order_gateway};
