//! 身份能力：OIDC 登录 / 登出 / 会话恢复、用户资料与显示名解析。
//!
//! 浏览器授权与令牌交换由外部身份提供方完成（`IdentityProvider`），
//! 令牌的安全存储由平台凭据库完成（`CredentialStore`）。

mod claims;
mod credentials;
mod profile;
mod service;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use claims::{UserInfo, decode_id_token};
pub use credentials::InMemoryCredentialStore;
pub use profile::{UserProfile, initials, resolve_display_name};
pub use service::{AuthService, SessionEvent, SessionSnapshot};

/// 认证相关错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// 身份提供方返回的错误描述，原样透出
    #[error("{0}")]
    Provider(String),
    #[error("credential store error: {0}")]
    CredentialStore(String),
    #[error("token invalid: {0}")]
    TokenInvalid(String),
}

/// 授权请求参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeRequest {
    pub domain: String,
    pub client_id: String,
    pub redirect_url: String,
    pub scope: String,
    /// 使用不保留 cookie 的临时浏览器会话
    pub ephemeral_session: bool,
}

/// 身份提供方签发的凭据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub id_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Credentials {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// 外部身份提供方。
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 执行浏览器授权并交换令牌。
    async fn authorize(&self, request: &AuthorizeRequest) -> Result<Credentials, AuthError>;

    /// 以 access token 获取用户资料。
    async fn user_info(&self, access_token: &str) -> Result<UserInfo, AuthError>;
}

/// 凭据存储（同步接口，登出需同步清除）。
pub trait CredentialStore: Send + Sync {
    fn store(&self, credentials: &Credentials) -> Result<(), AuthError>;

    fn load(&self) -> Result<Option<Credentials>, AuthError>;

    fn clear(&self) -> Result<(), AuthError>;

    /// 读取在 `now` 仍有效的凭据。
    fn valid_credentials(&self, now: DateTime<Utc>) -> Result<Option<Credentials>, AuthError> {
        Ok(self
            .load()?
            .filter(|credentials| credentials.is_valid_at(now)))
    }
}
