//! 文档库接口
//!
//! 远端文档库（托管数据库客户端）的最小能力面：
//! - 订阅：先推送一次当前结果集，之后每次变更推送完整结果集
//! - 写入：整文档覆盖、按字段合并更新、按 ID 删除

use crate::error::StorageError;
use crate::models::{DocumentQuery, SnapshotStream};
use async_trait::async_trait;
use record_contract::DocumentRecord;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 订阅查询结果；接收端丢弃即取消订阅。
    async fn subscribe(&self, query: DocumentQuery) -> Result<SnapshotStream, StorageError>;

    /// 以 `record.document_id` 为键写入整份文档（存在则覆盖）。
    async fn set_document(
        &self,
        collection: &str,
        record: DocumentRecord,
    ) -> Result<(), StorageError>;

    /// 合并更新已有文档的字段；文档不存在时报错。
    async fn update_document(
        &self,
        collection: &str,
        record: DocumentRecord,
    ) -> Result<(), StorageError>;

    /// 删除文档（不存在时视为成功）。
    async fn delete_document(&self, collection: &str, document_id: &str)
    -> Result<(), StorageError>;
}
