//! 应用运行配置加载。
//!
//! 所有键均有默认值（`TA_TECHNICIAN_ID` 除外），未设置时使用内置租户参数。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

pub const DEFAULT_AUTH_DOMAIN: &str = "dev-frosjzi3e85zszxa.us.auth0.com";
pub const DEFAULT_AUTH_CLIENT_ID: &str = "JNpxt8bUAJCYFnsaOhr8hv3yGee42fi1";
pub const DEFAULT_BUNDLE_ID: &str = "com.leosantos.TechAssist2";
pub const DEFAULT_URL_SCHEME: &str = "techassist2";
pub const DEFAULT_AUTH_SCOPE: &str = "openid profile email";
pub const DEFAULT_WORK_ORDERS_COLLECTION: &str = "workOrders";

/// 身份提供方参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    /// 租户域名
    pub domain: String,
    pub client_id: String,
    pub bundle_id: String,
    /// 回调 URL scheme
    pub url_scheme: String,
    pub scope: String,
    /// 登录时使用临时浏览器会话（不共享 cookie）
    pub ephemeral_session: bool,
}

impl AuthSettings {
    /// 回调地址：`{scheme}://{domain}/ios/{bundle_id}/callback`。
    pub fn redirect_url(&self) -> String {
        format!(
            "{}://{}/ios/{}/callback",
            self.url_scheme, self.domain, self.bundle_id
        )
    }
}

/// 应用运行配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub auth: AuthSettings,
    pub work_orders_collection: String,
    /// 订阅过滤用技术员 ID；为空时订阅整个集合
    pub technician_id: Option<String>,
    /// 实时列表为空时展示示例工单
    pub sample_fallback: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth = AuthSettings {
            domain: read_non_empty_with_default(&lookup, "TA_AUTH_DOMAIN", DEFAULT_AUTH_DOMAIN)?,
            client_id: read_non_empty_with_default(
                &lookup,
                "TA_AUTH_CLIENT_ID",
                DEFAULT_AUTH_CLIENT_ID,
            )?,
            bundle_id: read_non_empty_with_default(&lookup, "TA_BUNDLE_ID", DEFAULT_BUNDLE_ID)?,
            url_scheme: read_non_empty_with_default(
                &lookup,
                "TA_URL_SCHEME",
                DEFAULT_URL_SCHEME,
            )?,
            scope: read_non_empty_with_default(&lookup, "TA_AUTH_SCOPE", DEFAULT_AUTH_SCOPE)?,
            ephemeral_session: read_bool_with_default(
                &lookup,
                "TA_AUTH_EPHEMERAL_SESSION",
                true,
            )?,
        };
        let work_orders_collection = read_non_empty_with_default(
            &lookup,
            "TA_WORK_ORDERS_COLLECTION",
            DEFAULT_WORK_ORDERS_COLLECTION,
        )?;
        let technician_id = read_optional(&lookup, "TA_TECHNICIAN_ID");
        let sample_fallback = read_bool_with_default(&lookup, "TA_SAMPLE_FALLBACK", true)?;

        Ok(Self {
            auth,
            work_orders_collection,
            technician_id,
            sample_fallback,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth: AuthSettings {
                domain: DEFAULT_AUTH_DOMAIN.to_string(),
                client_id: DEFAULT_AUTH_CLIENT_ID.to_string(),
                bundle_id: DEFAULT_BUNDLE_ID.to_string(),
                url_scheme: DEFAULT_URL_SCHEME.to_string(),
                scope: DEFAULT_AUTH_SCOPE.to_string(),
                ephemeral_session: true,
            },
            work_orders_collection: DEFAULT_WORK_ORDERS_COLLECTION.to_string(),
            technician_id: None,
            sample_fallback: true,
        }
    }
}

/// 读取字符串；已设置但为空（或全空白）视为非法。
fn read_non_empty_with_default<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(key.to_string(), value))
        }
        Some(value) => Ok(value),
        None => Ok(default.to_string()),
    }
}

fn read_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(key) {
        Some(value) => value,
        None => return Ok(default),
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}
