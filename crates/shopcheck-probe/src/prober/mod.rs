//! Runs integration checks against a shop's Admin API.
//!
//! A check is strictly sequential: find the one host that answers, read its
//! scopes, walk the endpoint battery, then try the write path. Each step is
//! an `impl` block in its own file.

mod battery;
mod connect;
mod diagnostic;
mod fallback;
mod scopes;
mod write_path;

use serde_json::Value;
use shopcheck_core::AppConfig;

use crate::error::{ProbeError, TransportError};
use crate::transport::{Method, ProbeReply, ProbeRequest, ReqwestTransport, Transport};

pub use diagnostic::summarize_diagnostics;
pub use write_path::{discount_code_payload, price_rule_payload};

/// Checks a shop's credential through a [`Transport`].
///
/// Holds the access token for the lifetime of one check; build a new
/// `Prober` per shop.
pub struct Prober<T> {
    transport: T,
    access_token: String,
    scheme: String,
    test_code_prefix: String,
}

impl Prober<ReqwestTransport> {
    /// Builds a prober over a real HTTP client using the configured timeout,
    /// `User-Agent`, and test-code prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_config(config: &AppConfig, access_token: &str) -> Result<Self, ProbeError> {
        let transport = ReqwestTransport::new(config.request_timeout_secs, &config.user_agent)?;
        Ok(Self::new(transport, access_token).with_test_code_prefix(&config.test_code_prefix))
    }
}

impl<T: Transport> Prober<T> {
    pub fn new(transport: T, access_token: impl Into<String>) -> Self {
        Self {
            transport,
            access_token: access_token.into(),
            scheme: "https".to_owned(),
            test_code_prefix: "SHOPCHECK_TEST".to_owned(),
        }
    }

    /// Overrides the URL scheme. Shopify is HTTPS-only; `http` exists for
    /// pointing the prober at a local mock server.
    #[must_use]
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        scheme.clone_into(&mut self.scheme);
        self
    }

    #[must_use]
    pub fn with_test_code_prefix(mut self, prefix: &str) -> Self {
        prefix.clone_into(&mut self.test_code_prefix);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn admin_url(&self, host: &str, api_version: &str, resource: &str) -> String {
        format!(
            "{}://{host}/admin/api/{api_version}/{resource}",
            self.scheme
        )
    }

    pub(crate) fn scopes_url(&self, host: &str) -> String {
        format!("{}://{host}/admin/oauth/access_scopes.json", self.scheme)
    }

    pub(crate) async fn get(&self, url: &str) -> Result<ProbeReply, TransportError> {
        self.transport
            .send(ProbeRequest {
                method: Method::Get,
                url: url.to_owned(),
                access_token: self.access_token.clone(),
                body: None,
            })
            .await
    }

    pub(crate) async fn post(&self, url: &str, body: Value) -> Result<ProbeReply, TransportError> {
        self.transport
            .send(ProbeRequest {
                method: Method::Post,
                url: url.to_owned(),
                access_token: self.access_token.clone(),
                body: Some(body),
            })
            .await
    }
}

#[cfg(test)]
#[path = "../prober_test.rs"]
mod tests;
