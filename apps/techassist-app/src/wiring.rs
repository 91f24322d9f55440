//! 由配置构造组件。

use async_trait::async_trait;
use std::sync::Arc;
use techassist_auth::{
    AuthError, AuthService, AuthorizeRequest, CredentialStore, Credentials, IdentityProvider,
    UserInfo,
};
use techassist_config::{AppConfig, AuthSettings};
use techassist_storage::{DocumentStore, WorkOrderGateway};

/// 授权请求参数。
pub fn authorize_request(settings: &AuthSettings) -> AuthorizeRequest {
    AuthorizeRequest {
        domain: settings.domain.clone(),
        client_id: settings.client_id.clone(),
        redirect_url: settings.redirect_url(),
        scope: settings.scope.clone(),
        ephemeral_session: settings.ephemeral_session,
    }
}

/// 工单网关；未提供文档库时返回未连接网关。
pub fn work_order_gateway(
    config: &AppConfig,
    store: Option<Arc<dyn DocumentStore>>,
) -> WorkOrderGateway {
    match store {
        Some(store) => WorkOrderGateway::new(store, config.work_orders_collection.clone()),
        None => WorkOrderGateway::disconnected(config.work_orders_collection.clone()),
    }
}

const NO_PROVIDER: &str = "no identity provider configured";

/// 未接入浏览器授权时使用的身份提供方：授权与资料请求都失败，
/// 会话恢复退回凭据中的 ID token。
pub struct UnconfiguredProvider;

#[async_trait]
impl IdentityProvider for UnconfiguredProvider {
    async fn authorize(&self, _request: &AuthorizeRequest) -> Result<Credentials, AuthError> {
        Err(AuthError::Provider(NO_PROVIDER.to_string()))
    }

    async fn user_info(&self, _access_token: &str) -> Result<UserInfo, AuthError> {
        Err(AuthError::Provider(NO_PROVIDER.to_string()))
    }
}

/// 认证服务；授权参数来自配置。
pub fn auth_service(
    config: &AppConfig,
    provider: Arc<dyn IdentityProvider>,
    credentials: Arc<dyn CredentialStore>,
) -> AuthService {
    AuthService::new(provider, credentials, authorize_request(&config.auth))
}
