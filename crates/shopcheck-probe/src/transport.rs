//! The HTTP seam between the check flow and Shopify.
//!
//! The flow only ever needs "send this GET/POST, give me status and body, or
//! tell me whether the host was unreachable". [`Transport`] is that contract;
//! [`ReqwestTransport`] is the production implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::{ProbeError, TransportError};

pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Longest body excerpt kept for previews and error messages.
pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// One outbound Admin API call.
#[derive(Clone)]
pub struct ProbeRequest {
    pub method: Method,
    pub url: String,
    /// Sent verbatim as the access-token header; never inspected.
    pub access_token: String,
    pub body: Option<Value>,
}

impl std::fmt::Debug for ProbeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("access_token", &"[redacted]")
            .field("body", &self.body)
            .finish()
    }
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReply {
    pub status: u16,
    pub text: String,
}

impl ProbeReply {
    #[must_use]
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    /// 200 OK or 201 Created.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    /// Parses the body as JSON, `None` if it is not JSON.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.text).ok()
    }

    /// Best-effort error message: Shopify's `errors` (or `error`) field when
    /// the body is JSON, the raw text otherwise.
    #[must_use]
    pub fn error_message(&self) -> String {
        let field = self
            .json()
            .and_then(|body| body.get("errors").or_else(|| body.get("error")).cloned());

        match field {
            Some(Value::String(message)) => message,
            Some(other) => other.to_string(),
            None => self.preview(),
        }
    }

    /// The first [`PREVIEW_CHARS`] characters of the body.
    #[must_use]
    pub fn preview(&self) -> String {
        truncate_chars(&self.text, PREVIEW_CHARS)
    }
}

pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_owned(),
    }
}

/// Sends a single request and reports what came back.
///
/// Implementations must not retry; fallback across hosts and API versions
/// is driven by the caller.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ProbeRequest,
    ) -> impl Future<Output = Result<ProbeReply, TransportError>> + Send;
}

/// [`Transport`] over a `reqwest::Client` with a per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport whose every request times out after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ProbeRequest) -> Result<ProbeReply, TransportError> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        }
        .header(ACCESS_TOKEN_HEADER, &request.access_token)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .header(reqwest::header::ACCEPT, "application/json");

        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        tracing::debug!(method = ?request.method, url = %request.url, "sending admin api request");

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, &e))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, &e))?;

        Ok(ProbeReply { status, text })
    }
}
