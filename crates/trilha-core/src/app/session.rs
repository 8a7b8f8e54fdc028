//! SessionStore - owns the authentication token.
//!
//! Design:
//! - Hydrates exactly once at construction by reading the persisted
//!   credential; absence means unauthenticated, not an error.
//! - `login`/`logout` are the only mutations; every other consumer reads.
//! - The decoded display name is best-effort: a malformed claim never
//!   blocks login.

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::Mutex;

use crate::domain::CredentialError;
use crate::domain::session::Session;
use crate::ports::credentials::CredentialStore;

#[derive(Clone)]
pub struct SessionStore {
    session: Arc<Mutex<Session>>,
    store: Arc<dyn CredentialStore>,
}

impl SessionStore {
    /// Read the persisted credential once and build the shared handle.
    pub async fn hydrate(store: Arc<dyn CredentialStore>) -> Result<Self, CredentialError> {
        let session = match store.load().await? {
            Some(token) => {
                debug!("session hydrated from persisted credential");
                Session::from_token(token)
            }
            None => Session::default(),
        };
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            store,
        })
    }

    /// Persist the token and switch to the authenticated state.
    pub async fn login(&self, token: String) -> Result<(), CredentialError> {
        self.store.store(&token).await?;
        let mut session = self.session.lock().await;
        *session = Session::from_token(token);
        info!(
            "session opened (display name: {})",
            session.display_name.as_deref().unwrap_or("-")
        );
        Ok(())
    }

    /// Erase the persisted credential and drop all session state.
    pub async fn logout(&self) -> Result<(), CredentialError> {
        self.store.clear().await?;
        *self.session.lock().await = Session::default();
        info!("session closed");
        Ok(())
    }

    /// Current token, if any. Side-effect-free.
    pub async fn token(&self) -> Option<String> {
        self.session.lock().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.authenticated()
    }

    pub async fn display_name(&self) -> Option<String> {
        self.session.lock().await.display_name.clone()
    }
}
