//! 单次扫描会话
//!
//! 摄像头会对同一张二维码连续回调多帧；会话只接受布防后的第一次解码，
//! 结果通过 oneshot 交给等待方。重新布防会清除已扫描标记并替换等待方，
//! 旧的接收端随之收到通道关闭。

use std::sync::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, info};

/// 扫描会话结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Scanned(String),
    Cancelled,
}

#[derive(Default)]
struct SessionState {
    scan_id: Option<String>,
    has_scanned: bool,
    waiter: Option<oneshot::Sender<ScanOutcome>>,
}

/// 扫描会话（可跨线程共享）。
#[derive(Default)]
pub struct ScanSession {
    state: Mutex<SessionState>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 布防：开始新一轮扫描，返回结果接收端。
    pub fn arm(&self) -> oneshot::Receiver<ScanOutcome> {
        let (sender, receiver) = oneshot::channel();
        let scan_id = techassist_telemetry::new_scan_id();
        if let Ok(mut state) = self.state.lock() {
            debug!(scan_id = %scan_id, "scan session armed");
            *state = SessionState {
                scan_id: Some(scan_id),
                has_scanned: false,
                waiter: Some(sender),
            };
        }
        receiver
    }

    /// 帧解码回调；仅本轮第一次调用生效，返回是否被接受。
    pub fn on_frame_decoded(&self, payload: &str) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        if state.has_scanned {
            return false;
        }
        let Some(waiter) = state.waiter.take() else {
            return false;
        };
        state.has_scanned = true;
        info!(
            scan_id = state.scan_id.as_deref().unwrap_or_default(),
            payload, "scan captured"
        );
        // 接收端已丢弃时结果无人消费，仍视为本轮已完成
        let _ = waiter.send(ScanOutcome::Scanned(payload.to_string()));
        true
    }

    /// 取消本轮扫描；未布防或已完成时返回 false。
    pub fn cancel(&self) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        match state.waiter.take() {
            Some(waiter) => {
                debug!(
                    scan_id = state.scan_id.as_deref().unwrap_or_default(),
                    "scan session cancelled"
                );
                let _ = waiter.send(ScanOutcome::Cancelled);
                true
            }
            None => false,
        }
    }

    pub fn has_scanned(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.has_scanned)
            .unwrap_or(false)
    }

    /// 当前是否有等待中的接收方。
    pub fn is_armed(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.waiter.is_some())
            .unwrap_or(false)
    }
}
