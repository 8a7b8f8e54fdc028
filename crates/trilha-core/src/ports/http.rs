//! HttpClient port - the only seam through which the network is reached.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// One outgoing HTTP exchange, fully described.
///
/// The body is kept as `serde_json::Value` (the API is JSON-only), which also
/// lets the scripted transport assert on payloads without re-parsing bytes.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.headers
            .push(("Authorization".to_string(), format!("Bearer {token}")));
        self
    }

    /// Attach a JSON body; also sets the content type.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response that was actually obtained (any status).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON. An empty body decodes as JSON `null`, which
    /// covers confirmation endpoints that answer 200 with nothing.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        if self.body.is_empty() {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_slice(&self.body)
        }
    }
}

/// No response at all (DNS failure, refused connection, dropped socket...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Transport abstraction. Implementations must not interpret statuses:
/// a 500 is an `Ok(HttpResponse)`, only the absence of a response is an `Err`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_and_json_set_the_expected_headers() {
        let request = HttpRequest::new(Method::Post, "http://x/api/desafios")
            .bearer("tok-1")
            .json(serde_json::json!({ "nome": "n" }));

        assert_eq!(request.header("authorization"), Some("Bearer tok-1"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert!(request.body.is_some());
    }

    #[test]
    fn success_covers_exactly_the_2xx_range() {
        for (status, ok) in [(199, false), (200, true), (204, true), (299, true), (300, false), (404, false)] {
            let resp = HttpResponse { status, body: vec![] };
            assert_eq!(resp.is_success(), ok, "status {status}");
        }
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let resp = HttpResponse { status: 200, body: vec![] };
        let value: serde_json::Value = resp.json().unwrap();
        assert!(value.is_null());
    }
}
