//! 工单快照镜像
//!
//! 后台任务消费网关推送，每次用解码后的完整集合替换本地状态；
//! 无法解码的记录记日志后丢弃，不影响其余记录。读者通过 `watch` 获取快照。

use crate::error::StorageError;
use crate::gateway::{GatewayError, WorkOrderGateway};
use crate::models::SnapshotStream;
use chrono::{DateTime, Utc};
use domain::{WorkOrder, sample_work_orders};
use record_contract::decode_snapshot;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 镜像状态。
#[derive(Debug, Clone, Default)]
pub struct MirrorState {
    pub work_orders: Arc<Vec<WorkOrder>>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// 已应用的快照次数
    pub revision: u64,
}

pub struct WorkOrderMirror {
    state: Arc<watch::Sender<MirrorState>>,
    task: Mutex<Option<JoinHandle<()>>>,
    sample_fallback: bool,
}

impl WorkOrderMirror {
    pub fn new(sample_fallback: bool) -> Self {
        let (sender, _) = watch::channel(MirrorState::default());
        Self {
            state: Arc::new(sender),
            task: Mutex::new(None),
            sample_fallback,
        }
    }

    pub fn watch(&self) -> watch::Receiver<MirrorState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> MirrorState {
        self.state.borrow().clone()
    }

    /// 开始订阅；已有订阅会先被替换。
    pub async fn start(
        &self,
        gateway: &WorkOrderGateway,
        technician_id: Option<&str>,
    ) -> Result<(), GatewayError> {
        self.stop();
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });
        let stream = match gateway.subscribe(technician_id).await {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "work order subscription failed");
                techassist_telemetry::record_subscription_error();
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.error_message = Some(err.to_string());
                });
                return Err(err);
            }
        };
        let handle = tokio::spawn(run_mirror(stream, self.state.clone()));
        // 并发 start 时后登记者生效，被替换的任务在同一把锁内终止
        match self.task.lock() {
            Ok(mut task) => {
                if let Some(previous) = task.replace(handle) {
                    previous.abort();
                }
                Ok(())
            }
            Err(_) => {
                handle.abort();
                Err(GatewayError::Storage(StorageError::new("lock failed")))
            }
        }
    }

    /// 停止当前订阅。
    pub fn stop(&self) {
        if let Ok(mut task) = self.task.lock()
            && let Some(handle) = task.take()
        {
            handle.abort();
        }
    }

    /// 展示用集合：实时集合为空且开启兜底时返回示例工单。
    pub fn visible_work_orders(&self, now: DateTime<Utc>) -> Vec<WorkOrder> {
        self.visible_in(&self.state.borrow(), now)
    }

    /// 基于给定快照计算展示用集合，与该快照的其余字段保持一致。
    pub fn visible_in(&self, state: &MirrorState, now: DateTime<Utc>) -> Vec<WorkOrder> {
        if state.work_orders.is_empty() && self.sample_fallback {
            return sample_work_orders(now);
        }
        state.work_orders.as_ref().clone()
    }
}

impl Drop for WorkOrderMirror {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_mirror(mut stream: SnapshotStream, state: Arc<watch::Sender<MirrorState>>) {
    while let Some(batch) = stream.recv().await {
        match batch {
            Ok(records) => {
                techassist_telemetry::record_snapshot_received();
                let decoded = decode_snapshot(&records, Utc::now());
                for (document_id, err) in &decoded.rejected {
                    warn!(document_id = %document_id, error = %err, "dropping undecodable work order");
                }
                techassist_telemetry::record_records_decoded(decoded.work_orders.len() as u64);
                techassist_telemetry::record_records_dropped(decoded.rejected.len() as u64);
                info!(
                    work_orders = decoded.work_orders.len(),
                    dropped = decoded.rejected.len(),
                    "work order snapshot applied"
                );
                let work_orders = Arc::new(decoded.work_orders);
                state.send_modify(|state| {
                    state.work_orders = work_orders;
                    state.is_loading = false;
                    state.error_message = None;
                    state.revision += 1;
                });
            }
            Err(err) => {
                techassist_telemetry::record_subscription_error();
                warn!(error = %err, "work order subscription error");
                state.send_modify(|state| {
                    state.is_loading = false;
                    state.error_message = Some(err.to_string());
                });
            }
        }
    }
}
