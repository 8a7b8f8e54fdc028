//! Production HTTP transport backed by reqwest.

use async_trait::async_trait;

use crate::ports::http::{HttpClient, HttpRequest, HttpResponse, Method, TransportError};

pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    // TODO: configure a request timeout here; today a stalled call leaves the
    // owning unit loading forever (matches the current contract, still a gap).
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.inner.get(&request.url),
            Method::Post => self.inner.post(&request.url),
            Method::Put => self.inner.put(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        // Any status that arrives is a response; only I/O failures map to Err.
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
