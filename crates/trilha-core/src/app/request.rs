//! RequestUnit - the generic stateful fetch primitive.
//!
//! Design intent:
//! - One unit per logical resource; the unit's `FetchState` is the only
//!   observable it owns, and the unit is the only writer of that state.
//! - Every protected call flows through `execute`: token gate, bearer
//!   header, error extraction and typed decode all live here and nowhere
//!   else.
//! - Successive calls on the same unit serialize through a generation
//!   counter: once a newer call has started, a stale call's settlement no
//!   longer writes state (the network operation itself is not cancelled;
//!   its eventual resolution is simply discarded).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use ulid::Ulid;

use crate::api::wire;
use crate::domain::errors::{ApiError, ERRO_INESPERADO};
use crate::ports::http::{HttpClient, HttpRequest, Method};

use super::session::SessionStore;

/// Shorthand for body-less calls: `unit.execute(url, Method::Get, NO_BODY)`.
pub const NO_BODY: Option<&()> = None;

/// Observable state of one unit: at rest, loading, or settled with an error.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

pub struct RequestUnit<T> {
    state: Arc<Mutex<FetchState<T>>>,
    generation: Arc<AtomicU64>,
    http: Arc<dyn HttpClient>,
    session: SessionStore,
}

impl<T> Clone for RequestUnit<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
            http: Arc::clone(&self.http),
            session: self.session.clone(),
        }
    }
}

/// Correlation id for log lines: time-sortable, cheap, collision-free enough.
fn correlation_id() -> Ulid {
    let timestamp_ms = chrono::Utc::now().timestamp_millis() as u64;
    Ulid::from_parts(timestamp_ms, rand::random())
}

impl<T: DeserializeOwned + Clone> RequestUnit<T> {
    pub fn new(http: Arc<dyn HttpClient>, session: SessionStore) -> Self {
        Self {
            state: Arc::new(Mutex::new(FetchState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            http,
            session,
        }
    }

    /// Snapshot of the unit's current state.
    pub async fn state(&self) -> FetchState<T> {
        self.state.lock().await.clone()
    }

    /// Convenience for plain reads.
    pub async fn fetch(&self, url: &str) -> Option<T> {
        self.execute(url, Method::Get, NO_BODY).await
    }

    /// Issue one call. Resolves to the decoded value on success, `None` on
    /// any failure; the failure reason lands in `state().error`. Never
    /// panics, never propagates an error to the caller.
    pub async fn execute<B: Serialize>(
        &self,
        url: &str,
        method: Method,
        body: Option<&B>,
    ) -> Option<T> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }

        // Token gate: without a credential there is no network call at all.
        let Some(token) = self.session.token().await else {
            self.settle_error(my_generation, ApiError::NotAuthenticated.to_string())
                .await;
            return None;
        };

        let cid = correlation_id();
        debug!("[{cid}] {} {url}", method.as_str());

        let mut request = HttpRequest::new(method, url).bearer(&token);
        if let Some(body) = body {
            let value = serde_json::to_value(body).unwrap_or(serde_json::json!({}));
            request = request.json(value);
        }

        match self.http.send(request).await {
            Err(transport) => {
                let message = if transport.0.is_empty() {
                    ERRO_INESPERADO.to_string()
                } else {
                    ApiError::Transport(transport.0).to_string()
                };
                warn!("[{cid}] transport failure: {message}");
                self.settle_error(my_generation, message).await;
                None
            }
            Ok(response) if !response.is_success() => {
                let error = ApiError::Http {
                    status: response.status,
                    message: wire::error_message(response.status, &response.body),
                };
                warn!("[{cid}] http {}: {error}", response.status);
                self.settle_error(my_generation, error.to_string()).await;
                None
            }
            Ok(response) => match response.json::<T>() {
                Ok(value) => {
                    debug!("[{cid}] http {} ok", response.status);
                    self.settle_data(my_generation, value).await
                }
                Err(decode) => {
                    let message = ApiError::Decode(decode.to_string()).to_string();
                    warn!("[{cid}] {message}");
                    self.settle_error(my_generation, message).await;
                    None
                }
            },
        }
    }

    /// Write an error outcome unless a newer call has started meanwhile.
    async fn settle_error(&self, my_generation: u64, message: String) {
        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            debug!("stale settlement discarded ({message})");
            return;
        }
        state.loading = false;
        state.error = Some(message);
    }

    /// Write a success outcome unless stale; the caller gets the value
    /// either way.
    async fn settle_data(&self, my_generation: u64, value: T) -> Option<T> {
        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            debug!("stale settlement discarded (success)");
            return Some(value);
        }
        state.loading = false;
        state.error = None;
        state.data = Some(value.clone());
        Some(value)
    }
}
