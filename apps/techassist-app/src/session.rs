//! 会话视图模型
//!
//! 只通过 `SessionEvent` 更新自身状态，不直接读取认证服务。

use std::sync::{Arc, RwLock};
use techassist_auth::{SessionEvent, initials};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::warn;

const DEFAULT_TECHNICIAN: &str = "Technician";
const DEFAULT_INITIALS: &str = "U";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Default)]
pub struct SessionViewModel {
    state: RwLock<SessionView>,
}

impl SessionViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SessionView {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    pub fn apply(&self, event: &SessionEvent) {
        let Ok(mut state) = self.state.write() else {
            return;
        };
        match event {
            SessionEvent::LoginStarted => {
                *state = SessionView {
                    is_loading: true,
                    ..SessionView::default()
                };
            }
            SessionEvent::SignedIn(profile) => {
                *state = SessionView {
                    is_authenticated: true,
                    is_loading: false,
                    user_name: profile.display_name.clone(),
                    user_email: profile.email.clone(),
                    error_message: None,
                };
            }
            SessionEvent::LoginFailed(message) => {
                state.is_authenticated = false;
                state.is_loading = false;
                state.error_message = Some(message.clone());
            }
            SessionEvent::SignedOut => *state = SessionView::default(),
        }
    }

    /// 头部显示名：用户名 -> 邮箱 -> "Technician"。
    pub fn technician_name(&self) -> String {
        let view = self.view();
        view.user_name
            .or(view.user_email)
            .unwrap_or_else(|| DEFAULT_TECHNICIAN.to_string())
    }

    pub fn initials(&self) -> String {
        initials(self.view().user_name.as_deref(), DEFAULT_INITIALS)
    }

    /// 在后台消费认证事件，直到发送端关闭。
    pub fn listen(self: &Arc<Self>, mut events: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
        let model = self.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => model.apply(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "session events lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
