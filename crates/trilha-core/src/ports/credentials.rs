//! CredentialStore port - opaque persistence of the session token.
//!
//! One token string under one fixed key; the store never inspects it.
//! Absence is not an error (a fresh install simply has no token yet).

use async_trait::async_trait;

use crate::domain::CredentialError;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, CredentialError>;

    async fn store(&self, token: &str) -> Result<(), CredentialError>;

    async fn clear(&self) -> Result<(), CredentialError>;
}
