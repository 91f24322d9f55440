//! 二维码解析：扫描内容 -> 文章 / 工单 / 未找到。
//!
//! - `resolve`：纯查找
//! - `session`：单次扫描会话（首个解码结果生效，可重新布防、可取消）

mod resolve;
mod session;

pub use resolve::{NOT_FOUND_MESSAGE, ScanResolution, resolve_scan, route_scan};
pub use session::{ScanOutcome, ScanSession};
