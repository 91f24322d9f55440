//! 查询模型

use crate::error::StorageError;
use record_contract::{DocumentRecord, FieldValue};
use tokio::sync::mpsc;

/// 订阅推送：每次是一份完整结果集，或一次订阅错误。
pub type SnapshotStream = mpsc::UnboundedReceiver<Result<Vec<DocumentRecord>, StorageError>>;

/// 字段等值过滤。
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub equals: FieldValue,
}

/// 排序字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

/// 集合查询。
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    pub collection: String,
    pub filter: Option<FieldFilter>,
    pub order_by: Option<OrderBy>,
}

impl DocumentQuery {
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filter: None,
            order_by: None,
        }
    }

    pub fn where_equals(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.filter = Some(FieldFilter {
            field: field.into(),
            equals: value,
        });
        self
    }

    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            descending: true,
        });
        self
    }

    /// 记录是否满足过滤条件。
    pub fn matches(&self, record: &DocumentRecord) -> bool {
        match &self.filter {
            Some(filter) => record.get(&filter.field) == Some(&filter.equals),
            None => true,
        }
    }
}
