//! # TechAssist Storage 模块
//!
//! 远端文档库的接入层。
//!
//! ## 分层
//!
//! 1. **接口抽象层** (`traits.rs`)：`DocumentStore`，文档库客户端的最小能力面
//! 2. **查询模型层** (`models.rs`)：集合查询、过滤、排序与推送流类型
//! 3. **错误处理层** (`error.rs`)：`StorageError`
//! 4. **实现层** (`in_memory/`)：内存文档库（测试与本地演示）
//! 5. **类型化网关** (`gateway.rs`)：工单订阅 / 创建 / 更新 / 删除
//! 6. **快照镜像** (`mirror.rs`)：把推送的完整集合镜像为本地状态
//!
//! ## 一致性
//!
//! 每次推送整体替换本地集合，不做增量合并；写入以后到者为准，由文档库负责。

pub mod error;
pub mod gateway;
pub mod in_memory;
pub mod mirror;
pub mod models;
pub mod traits;

pub use error::*;
pub use gateway::*;
pub use in_memory::InMemoryDocumentStore;
pub use mirror::*;
pub use models::*;
pub use traits::*;
