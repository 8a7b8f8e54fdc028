//! Scripted HTTP transport for tests and the offline demo.
//!
//! Design:
//! - Every request sent is recorded (zero-network assertions on headers,
//!   payloads and call counts).
//! - Responses come from per-route queues first (substring match on the URL),
//!   then from a global FIFO. Routed queues keep concurrent fetches
//!   deterministic; the FIFO is enough for sequential tests.
//! - An outcome can carry a delay, which lets tests observe in-flight state
//!   under `tokio::time::pause`.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::http::{HttpClient, HttpRequest, HttpResponse, TransportError};

struct Scripted {
    outcome: Result<HttpResponse, TransportError>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct StubState {
    fifo: VecDeque<Scripted>,
    routed: Vec<(String, VecDeque<Scripted>)>,
    requests: Vec<HttpRequest>,
}

#[derive(Clone)]
pub struct StubHttpClient {
    state: Arc<Mutex<StubState>>,
}

impl StubHttpClient {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StubState::default())),
        }
    }

    fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    /// Queue a JSON response on the global FIFO.
    pub async fn respond_json(&self, status: u16, body: serde_json::Value) {
        self.push(None, Ok(Self::json_response(status, body)), None).await;
    }

    /// Queue a transport failure on the global FIFO.
    pub async fn respond_transport_error(&self, message: &str) {
        self.push(None, Err(TransportError(message.to_string())), None).await;
    }

    /// Queue a JSON response that settles only after `delay`.
    pub async fn respond_json_delayed(
        &self,
        status: u16,
        body: serde_json::Value,
        delay: Duration,
    ) {
        self.push(None, Ok(Self::json_response(status, body)), Some(delay)).await;
    }

    /// Queue a JSON response for every URL containing `pattern`.
    pub async fn route_json(&self, pattern: &str, status: u16, body: serde_json::Value) {
        self.push(Some(pattern), Ok(Self::json_response(status, body)), None).await;
    }

    /// Queue a transport failure for every URL containing `pattern`.
    pub async fn route_transport_error(&self, pattern: &str, message: &str) {
        self.push(Some(pattern), Err(TransportError(message.to_string())), None).await;
    }

    async fn push(
        &self,
        pattern: Option<&str>,
        outcome: Result<HttpResponse, TransportError>,
        delay: Option<Duration>,
    ) {
        let scripted = Scripted { outcome, delay };
        let mut state = self.state.lock().await;
        match pattern {
            None => state.fifo.push_back(scripted),
            Some(pattern) => {
                if let Some((_, queue)) = state.routed.iter_mut().find(|(p, _)| p == pattern) {
                    queue.push_back(scripted);
                } else {
                    state
                        .routed
                        .push((pattern.to_string(), VecDeque::from([scripted])));
                }
            }
        }
    }

    /// Everything sent so far, in order.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }

    /// How many sent requests target a URL containing `pattern`.
    pub async fn requests_matching(&self, pattern: &str) -> usize {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .filter(|r| r.url.contains(pattern))
            .count()
    }
}

impl Default for StubHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let scripted = {
            let mut state = self.state.lock().await;
            state.requests.push(request.clone());

            let routed = state
                .routed
                .iter_mut()
                .find(|(pattern, queue)| request.url.contains(pattern.as_str()) && !queue.is_empty())
                .and_then(|(_, queue)| queue.pop_front());

            match routed {
                Some(scripted) => Some(scripted),
                None => state.fifo.pop_front(),
            }
        };

        // ロックを持ったまま sleep しない
        let Some(scripted) = scripted else {
            return Err(TransportError(format!(
                "stub: sem resposta roteirizada para {} {}",
                request.method.as_str(),
                request.url
            )));
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::http::Method;

    #[tokio::test]
    async fn fifo_plays_back_in_order() {
        let stub = StubHttpClient::new();
        stub.respond_json(200, serde_json::json!({ "n": 1 })).await;
        stub.respond_json(500, serde_json::json!({ "n": 2 })).await;

        let first = stub
            .send(HttpRequest::new(Method::Get, "http://x/a"))
            .await
            .unwrap();
        let second = stub
            .send(HttpRequest::new(Method::Get, "http://x/b"))
            .await
            .unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 500);
        assert_eq!(stub.request_count().await, 2);
    }

    #[tokio::test]
    async fn routed_responses_win_over_the_fifo() {
        let stub = StubHttpClient::new();
        stub.respond_json(200, serde_json::json!([])).await;
        stub.route_json("/tarefas", 200, serde_json::json!([{ "marker": true }]))
            .await;

        let routed = stub
            .send(HttpRequest::new(Method::Get, "http://x/desafios/c1/tarefas"))
            .await
            .unwrap();
        let body: serde_json::Value = routed.json().unwrap();
        assert_eq!(body[0]["marker"], true);

        // Unmatched URL falls back to the FIFO.
        let fallback = stub
            .send(HttpRequest::new(Method::Get, "http://x/outra"))
            .await
            .unwrap();
        assert_eq!(fallback.status, 200);
    }

    #[tokio::test]
    async fn exhausted_script_is_a_transport_error() {
        let stub = StubHttpClient::new();
        let err = stub
            .send(HttpRequest::new(Method::Get, "http://x/a"))
            .await
            .unwrap_err();
        assert!(err.0.contains("sem resposta roteirizada"));
    }
}
