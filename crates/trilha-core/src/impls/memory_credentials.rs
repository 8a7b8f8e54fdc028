//! In-memory credential store (dev/test).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::CredentialError;
use crate::ports::credentials::CredentialStore;

#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    token: Arc<Mutex<Option<String>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start already holding a token (process-restart scenarios in tests).
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.token.lock().await.clone())
    }

    async fn store(&self, token: &str) -> Result<(), CredentialError> {
        *self.token.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        *self.token.lock().await = None;
        Ok(())
    }
}
