//! 存储层错误类型
//!
//! 文档库客户端的错误只携带一条消息：
//! - 连接 / 订阅错误
//! - 文档不存在
//! - 锁失败

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

