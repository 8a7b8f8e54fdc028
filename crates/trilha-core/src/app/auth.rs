//! AuthFlow - login and registration.
//!
//! The auth endpoints are the two calls made without a bearer token, so they
//! talk to the transport port directly instead of going through a
//! RequestUnit (whose token gate would short-circuit them). Error extraction
//! is shared with the rest of the API surface.

use std::sync::Arc;

use log::{info, warn};

use crate::api::routes::Routes;
use crate::api::wire::{self, LoginRequest, LoginResponse, RegisterRequest};
use crate::domain::ValidationErrors;
use crate::ports::http::{HttpClient, HttpRequest, Method};

use super::notifier::NotificationCenter;
use super::session::SessionStore;

pub struct AuthFlow {
    http: Arc<dyn HttpClient>,
    routes: Routes,
    session: SessionStore,
    notifier: NotificationCenter,
}

impl AuthFlow {
    pub fn new(
        http: Arc<dyn HttpClient>,
        routes: Routes,
        session: SessionStore,
        notifier: NotificationCenter,
    ) -> Self {
        Self {
            http,
            routes,
            session,
            notifier,
        }
    }

    /// Exchange credentials for a bearer token and open the session.
    ///
    /// `Ok(true)` means authenticated; `Ok(false)` means the attempt failed
    /// and the reason is on the notification slot; `Err` carries inline
    /// field errors (nothing was sent).
    pub async fn login(&self, email: &str, password: &str) -> Result<bool, ValidationErrors> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let request = HttpRequest::new(Method::Post, self.routes.login())
            .json(serde_json::to_value(&payload).unwrap_or(serde_json::json!({})));

        let response = match self.http.send(request).await {
            Ok(response) => response,
            Err(_) => {
                self.notifier.error("Erro na comunicação com o servidor.").await;
                return Ok(false);
            }
        };

        if !response.is_success() {
            let message = wire::error_message(response.status, &response.body);
            warn!("login rejected: {message}");
            self.notifier.error(message).await;
            return Ok(false);
        }

        let decoded: LoginResponse = match response.json() {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("login response did not decode: {e}");
                self.notifier.error("Erro na comunicação com o servidor.").await;
                return Ok(false);
            }
        };

        if let Err(e) = self.session.login(decoded.access_token).await {
            self.notifier.error(e.to_string()).await;
            return Ok(false);
        }
        info!("login succeeded");
        Ok(true)
    }

    /// Create an account. On success the caller is expected to move the user
    /// to the login flow (the server does not auto-login).
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, ValidationErrors> {
        let payload = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let request = HttpRequest::new(Method::Post, self.routes.register())
            .json(serde_json::to_value(&payload).unwrap_or(serde_json::json!({})));

        match self.http.send(request).await {
            Ok(response) if response.is_success() => {
                self.notifier
                    .success("Cadastro realizado com sucesso! Você pode agora fazer o login.")
                    .await;
                Ok(true)
            }
            Ok(response) => {
                let message = wire::error_message(response.status, &response.body);
                self.notifier.error(message).await;
                Ok(false)
            }
            Err(_) => {
                self.notifier.error("Erro na comunicação com o servidor.").await;
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use crate::impls::memory_credentials::InMemoryCredentialStore;
    use crate::impls::stub_http::StubHttpClient;

    async fn flow(stub: &StubHttpClient) -> (AuthFlow, SessionStore, NotificationCenter) {
        let session = SessionStore::hydrate(Arc::new(InMemoryCredentialStore::new()))
            .await
            .unwrap();
        let notifier = NotificationCenter::default();
        let auth = AuthFlow::new(
            Arc::new(stub.clone()),
            Routes::new("http://x/api"),
            session.clone(),
            notifier.clone(),
        );
        (auth, session, notifier)
    }

    #[tokio::test]
    async fn login_opens_the_session() {
        let stub = StubHttpClient::new();
        stub.respond_json(200, serde_json::json!({ "accessToken": "tok-jwt" }))
            .await;
        let (auth, session, _) = flow(&stub).await;

        let ok = auth.login("a@b.com", "secret").await.unwrap();

        assert!(ok);
        assert!(session.is_authenticated().await);

        // The auth call itself carries no bearer header.
        let requests = stub.requests().await;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].header("authorization").is_none());
        assert!(requests[0].url.ends_with("/auth/login"));
    }

    #[tokio::test]
    async fn rejected_login_stays_unauthenticated() {
        let stub = StubHttpClient::new();
        stub.respond_json(401, serde_json::json!({ "message": "Credenciais inválidas" }))
            .await;
        let (auth, session, notifier) = flow(&stub).await;

        let ok = auth.login("a@b.com", "wrong").await.unwrap();

        assert!(!ok);
        assert!(!session.is_authenticated().await);
        let notification = notifier.snapshot().await;
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Credenciais inválidas");
    }

    #[tokio::test]
    async fn empty_fields_block_the_request() {
        let stub = StubHttpClient::new();
        let (auth, _, _) = flow(&stub).await;

        let errors = auth.login("", "secret").await.unwrap_err();

        assert!(errors.field("email").is_some());
        assert_eq!(stub.request_count().await, 0);
    }

    #[tokio::test]
    async fn register_reports_success() {
        let stub = StubHttpClient::new();
        stub.respond_json(201, serde_json::json!({})).await;
        let (auth, session, notifier) = flow(&stub).await;

        let ok = auth.register("Maria", "a@b.com", "secret").await.unwrap();

        assert!(ok);
        // Registration does not open a session.
        assert!(!session.is_authenticated().await);
        assert_eq!(notifier.snapshot().await.severity, Severity::Success);
    }

    #[tokio::test]
    async fn transport_failure_is_a_notification_not_a_fault() {
        let stub = StubHttpClient::new();
        stub.respond_transport_error("dns").await;
        let (auth, _, notifier) = flow(&stub).await;

        let ok = auth.login("a@b.com", "secret").await.unwrap();

        assert!(!ok);
        assert_eq!(
            notifier.snapshot().await.message,
            "Erro na comunicação com o servidor."
        );
    }
}
