//! BalanceSynchronizer - cross-entity points refresh trigger.
//!
//! The server owns the point total; the client never derives it from task
//! points. A failed refresh keeps the previous value on display (no flashing
//! "no data") and surfaces the reason through the notification slot.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::api::wire::UserPointsResponse;
use crate::domain::PointsBalance;
use crate::ports::http::HttpClient;

use super::notifier::NotificationCenter;
use super::optimistic::CommitHook;
use super::request::RequestUnit;
use super::session::SessionStore;

#[derive(Clone)]
pub struct BalanceSynchronizer {
    unit: RequestUnit<UserPointsResponse>,
    balance: Arc<Mutex<PointsBalance>>,
    url: String,
    notifier: NotificationCenter,
}

impl BalanceSynchronizer {
    /// `url` is the points endpoint for one challenge; the synchronizer is
    /// scoped to it for its whole life.
    pub fn new(
        http: Arc<dyn HttpClient>,
        session: SessionStore,
        notifier: NotificationCenter,
        url: String,
    ) -> Self {
        Self {
            unit: RequestUnit::new(http, session),
            balance: Arc::new(Mutex::new(PointsBalance::default())),
            url,
            notifier,
        }
    }

    /// Re-read the point total and replace the held value.
    pub async fn refresh(&self) {
        match self.unit.fetch(&self.url).await {
            Some(points) => {
                self.balance.lock().await.replace(points.pontos);
            }
            None => {
                // Previous value intentionally kept.
                let message = self
                    .unit
                    .state()
                    .await
                    .error
                    .unwrap_or_else(|| "Erro ao atualizar os pontos.".to_string());
                self.notifier.error(message).await;
            }
        }
    }

    pub async fn value(&self) -> Option<i64> {
        self.balance.lock().await.value
    }
}

#[async_trait]
impl CommitHook for BalanceSynchronizer {
    async fn after_commit(&self) {
        self.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::memory_credentials::InMemoryCredentialStore;
    use crate::impls::stub_http::StubHttpClient;

    async fn synchronizer(stub: &StubHttpClient) -> (BalanceSynchronizer, NotificationCenter) {
        let session = SessionStore::hydrate(Arc::new(InMemoryCredentialStore::with_token("tok")))
            .await
            .unwrap();
        let notifier = NotificationCenter::default();
        let sync = BalanceSynchronizer::new(
            Arc::new(stub.clone()),
            session,
            notifier.clone(),
            "http://x/api/pontos-usuario/c1".to_string(),
        );
        (sync, notifier)
    }

    #[tokio::test]
    async fn refresh_replaces_the_value() {
        let stub = StubHttpClient::new();
        stub.respond_json(200, serde_json::json!({ "pontos": 42 })).await;
        let (sync, _) = synchronizer(&stub).await;

        assert_eq!(sync.value().await, None);
        sync.refresh().await;
        assert_eq!(sync.value().await, Some(42));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_previous_value() {
        let stub = StubHttpClient::new();
        stub.respond_json(200, serde_json::json!({ "pontos": 42 })).await;
        stub.respond_json(500, serde_json::json!({ "message": "indisponível" }))
            .await;
        let (sync, notifier) = synchronizer(&stub).await;

        sync.refresh().await;
        sync.refresh().await;

        assert_eq!(sync.value().await, Some(42));
        let notification = notifier.snapshot().await;
        assert!(notification.visible);
        assert_eq!(notification.message, "indisponível");
    }
}
