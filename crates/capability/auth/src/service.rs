//! 认证服务
//!
//! 会话状态变化以离散事件广播（`SessionEvent`），消费方订阅后维护自己的快照；
//! `snapshot()` 提供服务端当前状态。

use crate::claims::decode_id_token;
use crate::profile::UserProfile;
use crate::{AuthError, AuthorizeRequest, CredentialStore, Credentials, IdentityProvider};
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{info, warn};

const EVENT_CAPACITY: usize = 16;

/// 会话事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoginStarted,
    SignedIn(UserProfile),
    LoginFailed(String),
    SignedOut,
}

/// 会话状态快照。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub profile: Option<UserProfile>,
    pub error_message: Option<String>,
}

pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    credentials: Arc<dyn CredentialStore>,
    request: AuthorizeRequest,
    events: broadcast::Sender<SessionEvent>,
    state: RwLock<SessionSnapshot>,
}

impl AuthService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        credentials: Arc<dyn CredentialStore>,
        request: AuthorizeRequest,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            provider,
            credentials,
            request,
            events,
            state: RwLock::new(SessionSnapshot::default()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    /// 登录。
    ///
    /// 先清除已缓存的会话（支持切换账号），再走浏览器授权。
    /// 资料获取失败只记日志，退回 ID token 中的 claims。
    pub async fn login(&self) -> Result<UserProfile, AuthError> {
        self.clear_credentials();
        self.update(|state| {
            *state = SessionSnapshot {
                is_loading: true,
                ..SessionSnapshot::default()
            };
        });
        self.emit(SessionEvent::LoginStarted);

        let credentials = match self.provider.authorize(&self.request).await {
            Ok(credentials) => credentials,
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, "login failed");
                techassist_telemetry::record_login_failure();
                self.update(|state| {
                    state.is_loading = false;
                    state.is_authenticated = false;
                    state.error_message = Some(message.clone());
                });
                self.emit(SessionEvent::LoginFailed(message));
                return Err(err);
            }
        };

        if let Err(err) = self.credentials.store(&credentials) {
            warn!(error = %err, "storing credentials failed");
        }
        let profile = self.fetch_profile(&credentials).await;
        info!(subject = ?profile.subject, "login succeeded");
        techassist_telemetry::record_login_success();
        self.sign_in(profile.clone());
        Ok(profile)
    }

    /// 登出：同步清除本地凭据，不注销服务端会话。
    pub fn logout(&self) {
        self.clear_credentials();
        self.update(|state| *state = SessionSnapshot::default());
        techassist_telemetry::record_logout();
        info!("signed out");
        self.emit(SessionEvent::SignedOut);
    }

    /// 启动时检查缓存凭据；有效则恢复会话并返回 true。
    pub async fn check_session(&self, now: DateTime<Utc>) -> bool {
        let credentials = match self.credentials.valid_credentials(now) {
            Ok(Some(credentials)) => credentials,
            Ok(None) => {
                self.update(|state| state.is_authenticated = false);
                return false;
            }
            Err(err) => {
                warn!(error = %err, "reading stored credentials failed");
                self.update(|state| state.is_authenticated = false);
                return false;
            }
        };
        let profile = self.fetch_profile(&credentials).await;
        info!(subject = ?profile.subject, "session restored");
        self.sign_in(profile);
        true
    }

    async fn fetch_profile(&self, credentials: &Credentials) -> UserProfile {
        match self.provider.user_info(&credentials.access_token).await {
            Ok(info) => UserProfile::from(&info),
            Err(err) => {
                warn!(error = %err, "fetching user info failed, using id token claims");
                credentials
                    .id_token
                    .as_deref()
                    .and_then(|token| {
                        decode_id_token(token)
                            .inspect_err(|err| warn!(error = %err, "id token unreadable"))
                            .ok()
                    })
                    .map(|claims| UserProfile::from(&claims))
                    .unwrap_or_default()
            }
        }
    }

    fn sign_in(&self, profile: UserProfile) {
        self.update(|state| {
            *state = SessionSnapshot {
                is_authenticated: true,
                is_loading: false,
                profile: Some(profile.clone()),
                error_message: None,
            };
        });
        self.emit(SessionEvent::SignedIn(profile));
    }

    fn clear_credentials(&self) {
        if let Err(err) = self.credentials.clear() {
            warn!(error = %err, "clearing credentials failed");
        }
    }

    fn update(&self, apply: impl FnOnce(&mut SessionSnapshot)) {
        if let Ok(mut state) = self.state.write() {
            apply(&mut state);
        }
    }

    fn emit(&self, event: SessionEvent) {
        // 无订阅者时丢弃事件
        let _ = self.events.send(event);
    }
}
