//! 文档库内存实现
//!
//! 功能：
//! - 按集合存放文档
//! - 订阅者在每次写入后收到完整结果集
//! - 可向所有订阅者注入一次订阅错误（测试用）

use crate::error::StorageError;
use crate::models::{DocumentQuery, SnapshotStream};
use crate::traits::DocumentStore;
use record_contract::{DocumentRecord, FieldValue};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use tokio::sync::mpsc;

struct Subscriber {
    query: DocumentQuery,
    sender: mpsc::UnboundedSender<Result<Vec<DocumentRecord>, StorageError>>,
}

/// 文档库内存存储
///
/// 使用 RwLock + HashMap 存放文档，Mutex 保护订阅者列表。
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, HashMap<String, DocumentRecord>>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 集合内文档数量（用于测试）
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|map| map.get(collection).map(HashMap::len).unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn get(&self, collection: &str, document_id: &str) -> Option<DocumentRecord> {
        self.collections
            .read()
            .ok()
            .and_then(|map| map.get(collection)?.get(document_id).cloned())
    }

    /// 当前仍在监听的订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|mut subscribers| {
                subscribers.retain(|subscriber| !subscriber.sender.is_closed());
                subscribers.len()
            })
            .unwrap_or(0)
    }

    /// 向所有订阅者推送一次错误。
    pub fn broadcast_error(&self, message: &str) -> Result<(), StorageError> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|_| StorageError::new("lock failed"))?;
        subscribers
            .retain(|subscriber| subscriber.sender.send(Err(StorageError::new(message))).is_ok());
        Ok(())
    }

    fn run_query(&self, query: &DocumentQuery) -> Result<Vec<DocumentRecord>, StorageError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut records: Vec<DocumentRecord> = collections
            .get(&query.collection)
            .map(|documents| {
                documents
                    .values()
                    .filter(|record| query.matches(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        // 文档 ID 作为次序键，保证结果稳定
        records.sort_by(|a, b| a.document_id.cmp(&b.document_id));
        if let Some(order) = &query.order_by {
            records.sort_by(|a, b| {
                let ordering = compare_field(a.get(&order.field), b.get(&order.field));
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        Ok(records)
    }

    /// 向关注该集合的订阅者推送最新结果集，并清理已关闭的订阅。
    fn notify(&self, collection: &str) -> Result<(), StorageError> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut alive = Vec::with_capacity(subscribers.len());
        for subscriber in subscribers.drain(..) {
            if subscriber.query.collection != collection {
                if !subscriber.sender.is_closed() {
                    alive.push(subscriber);
                }
                continue;
            }
            let snapshot = self.run_query(&subscriber.query);
            if subscriber.sender.send(snapshot).is_ok() {
                alive.push(subscriber);
            }
        }
        *subscribers = alive;
        Ok(())
    }
}

/// 字段排序：缺失或类型不同的值排在最后。
fn compare_field(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (Some(FieldValue::TimestampValue(a)), Some(FieldValue::TimestampValue(b))) => a.cmp(b),
        (Some(FieldValue::StringValue(a)), Some(FieldValue::StringValue(b))) => a.cmp(b),
        (Some(FieldValue::IntegerValue(a)), Some(FieldValue::IntegerValue(b))) => a.cmp(b),
        (Some(FieldValue::DoubleValue(a)), Some(FieldValue::DoubleValue(b))) => a.total_cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn subscribe(&self, query: DocumentQuery) -> Result<SnapshotStream, StorageError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        // 首个快照与登记在订阅者锁内完成
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|_| StorageError::new("lock failed"))?;
        let initial = self.run_query(&query)?;
        // 新建通道，接收端尚在，发送不会失败
        let _ = sender.send(Ok(initial));
        subscribers.push(Subscriber { query, sender });
        Ok(receiver)
    }

    async fn set_document(
        &self,
        collection: &str,
        record: DocumentRecord,
    ) -> Result<(), StorageError> {
        {
            let mut collections = self
                .collections
                .write()
                .map_err(|_| StorageError::new("lock failed"))?;
            collections
                .entry(collection.to_string())
                .or_default()
                .insert(record.document_id.clone(), record);
        }
        self.notify(collection)
    }

    async fn update_document(
        &self,
        collection: &str,
        record: DocumentRecord,
    ) -> Result<(), StorageError> {
        {
            let mut collections = self
                .collections
                .write()
                .map_err(|_| StorageError::new("lock failed"))?;
            let existing = collections
                .get_mut(collection)
                .and_then(|documents| documents.get_mut(&record.document_id))
                .ok_or_else(|| {
                    StorageError::new(format!("document not found: {}", record.document_id))
                })?;
            existing.fields.extend(record.fields);
        }
        self.notify(collection)
    }

    async fn delete_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<(), StorageError> {
        let removed = {
            let mut collections = self
                .collections
                .write()
                .map_err(|_| StorageError::new("lock failed"))?;
            collections
                .get_mut(collection)
                .and_then(|documents| documents.remove(document_id))
                .is_some()
        };
        if removed {
            self.notify(collection)?;
        }
        Ok(())
    }
}
