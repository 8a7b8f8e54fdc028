//! ClientBuilder - construction and wiring.
//!
//! The services exist exactly once per process and reach their consumers by
//! handle, never through ambient globals. `build()` is the init boundary: it
//! hydrates the session from the credential store. There is no teardown
//! beyond process exit.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::api::routes::Routes;
use crate::domain::{ChallengeId, CredentialError};
use crate::impls::memory_credentials::InMemoryCredentialStore;
use crate::impls::reqwest_http::ReqwestClient;
use crate::ports::credentials::CredentialStore;
use crate::ports::http::HttpClient;

use super::auth::AuthFlow;
use super::board::ChallengeBoard;
use super::challenges::ChallengeDirectory;
use super::notifier::NotificationCenter;
use super::session::SessionStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root, e.g. `http://10.0.2.2:3002/api`.
    pub base_url: String,
    /// Auto-dismiss delay for notifications, milliseconds.
    pub dismiss_after_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3002/api".to_string(),
            dismiss_after_ms: 3000,
        }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to hydrate the session: {0}")]
    Hydrate(#[from] CredentialError),
}

pub struct ClientBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl ClientBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            credentials: None,
        }
    }

    /// Swap the transport (tests and the offline demo use the stub here).
    pub fn http(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Swap the credential store (defaults to in-memory).
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Wire everything and hydrate the session.
    pub async fn build(self) -> Result<Client, BuildError> {
        let http = self
            .http
            .unwrap_or_else(|| Arc::new(ReqwestClient::new()));
        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(InMemoryCredentialStore::new()));

        let session = SessionStore::hydrate(credentials).await?;
        let notifier =
            NotificationCenter::new(Duration::from_millis(self.config.dismiss_after_ms));

        Ok(Client {
            routes: Routes::new(self.config.base_url),
            http,
            session,
            notifier,
        })
    }
}

/// Handle bundle for the whole client; everything a screen needs hangs off
/// of it.
pub struct Client {
    routes: Routes,
    http: Arc<dyn HttpClient>,
    session: SessionStore,
    notifier: NotificationCenter,
}

impl Client {
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn notifier(&self) -> &NotificationCenter {
        &self.notifier
    }

    pub fn auth(&self) -> AuthFlow {
        AuthFlow::new(
            Arc::clone(&self.http),
            self.routes.clone(),
            self.session.clone(),
            self.notifier.clone(),
        )
    }

    pub fn challenges(&self) -> ChallengeDirectory {
        ChallengeDirectory::new(
            Arc::clone(&self.http),
            self.routes.clone(),
            self.session.clone(),
            self.notifier.clone(),
        )
    }

    /// A fresh board for one challenge. Boards are per-view state: calling
    /// this twice yields two independent snapshots.
    pub fn board(&self, challenge_id: ChallengeId) -> ChallengeBoard {
        ChallengeBoard::new(
            Arc::clone(&self.http),
            self.routes.clone(),
            self.session.clone(),
            self.notifier.clone(),
            challenge_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::stub_http::StubHttpClient;

    #[tokio::test]
    async fn build_hydrates_from_the_injected_store() {
        let client = ClientBuilder::new(Config::default())
            .http(Arc::new(StubHttpClient::new()))
            .credentials(Arc::new(InMemoryCredentialStore::with_token("persisted")))
            .build()
            .await
            .unwrap();

        assert!(client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn two_boards_are_independent_snapshots() {
        let stub = StubHttpClient::new();
        stub.route_json(
            "desafios/c1/tarefas",
            200,
            serde_json::json!([
                { "id": "t1", "descricao": "Correr", "pontos": 10, "status": "PENDENTE" }
            ]),
        )
        .await;
        let client = ClientBuilder::new(Config::default())
            .http(Arc::new(stub.clone()))
            .credentials(Arc::new(InMemoryCredentialStore::with_token("tok")))
            .build()
            .await
            .unwrap();

        let first = client.board(ChallengeId::new("c1"));
        let second = client.board(ChallengeId::new("c1"));

        first.tasks().load().await;

        assert_eq!(first.tasks().items().await.len(), 1);
        assert!(second.tasks().items().await.is_empty());
    }
}
