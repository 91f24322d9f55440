//! 工单网关
//!
//! 在文档库之上提供类型化的工单订阅与写入。网关显式构造并按句柄传递；
//! 未连接文档库时所有操作直接返回 `GatewayError::NotInitialized`。

use crate::error::StorageError;
use crate::models::{DocumentQuery, SnapshotStream};
use crate::traits::DocumentStore;
use domain::WorkOrder;
use record_contract::{FieldValue, encode_work_order, fields};
use std::sync::Arc;
use tracing::{debug, warn};

/// 网关错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("document store not initialized")]
    NotInitialized,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct WorkOrderGateway {
    store: Option<Arc<dyn DocumentStore>>,
    collection: String,
}

impl WorkOrderGateway {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store: Some(store),
            collection: collection.into(),
        }
    }

    /// 未连接文档库的网关。
    pub fn disconnected(collection: impl Into<String>) -> Self {
        Self {
            store: None,
            collection: collection.into(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// 工单查询：可选按技术员 ID 过滤，按创建时间倒序。
    pub fn query(&self, technician_id: Option<&str>) -> DocumentQuery {
        let query = DocumentQuery::collection(self.collection.clone());
        let query = match technician_id {
            Some(id) => query.where_equals(
                fields::ASSIGNED_TECHNICIAN_ID,
                FieldValue::StringValue(id.to_string()),
            ),
            None => query,
        };
        query.order_by_desc(fields::CREATED_AT)
    }

    /// 订阅工单集合；每次推送是一份完整的记录集。
    pub async fn subscribe(
        &self,
        technician_id: Option<&str>,
    ) -> Result<SnapshotStream, GatewayError> {
        let store = self.store()?;
        debug!(collection = %self.collection, technician_id, "subscribing to work orders");
        Ok(store.subscribe(self.query(technician_id)).await?)
    }

    pub async fn create(&self, order: &WorkOrder) -> Result<(), GatewayError> {
        let store = self.store()?;
        store
            .set_document(&self.collection, encode_work_order(order))
            .await
            .inspect_err(|err| warn!(task_code = %order.task_code, error = %err, "create failed"))?;
        Ok(())
    }

    /// 更新已有工单；文档不存在时失败。
    pub async fn update(&self, order: &WorkOrder) -> Result<(), GatewayError> {
        let store = self.store()?;
        store
            .update_document(&self.collection, encode_work_order(order))
            .await
            .inspect_err(|err| warn!(task_code = %order.task_code, error = %err, "update failed"))?;
        Ok(())
    }

    pub async fn delete(&self, order: &WorkOrder) -> Result<(), GatewayError> {
        let store = self.store()?;
        store
            .delete_document(&self.collection, &order.id().to_string())
            .await
            .inspect_err(|err| warn!(task_code = %order.task_code, error = %err, "delete failed"))?;
        Ok(())
    }

    fn store(&self) -> Result<&Arc<dyn DocumentStore>, GatewayError> {
        self.store.as_ref().ok_or(GatewayError::NotInitialized)
    }
}
