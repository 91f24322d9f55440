//! 凭据内存存储（测试与本地演示）。

use crate::{AuthError, CredentialStore, Credentials};
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<Option<Credentials>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn store(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let mut slot = self
            .credentials
            .write()
            .map_err(|_| AuthError::CredentialStore("lock failed".to_string()))?;
        *slot = Some(credentials.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        let slot = self
            .credentials
            .read()
            .map_err(|_| AuthError::CredentialStore("lock failed".to_string()))?;
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut slot = self
            .credentials
            .write()
            .map_err(|_| AuthError::CredentialStore("lock failed".to_string()))?;
        *slot = None;
        Ok(())
    }
}
