//! In-memory [`Transport`] for flow tests: scripted replies per URL and a
//! log of every request made.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::TransportError;
use crate::transport::{Method, ProbeReply, ProbeRequest, Transport};

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: HashMap<(Method, String), Result<ProbeReply, TransportError>>,
    calls: Mutex<Vec<ProbeRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on_get(mut self, url: &str, status: u16, body: &Value) -> Self {
        self.replies.insert(
            (Method::Get, url.to_owned()),
            Ok(ProbeReply::new(status, body.to_string())),
        );
        self
    }

    pub(crate) fn on_get_text(mut self, url: &str, status: u16, text: &str) -> Self {
        self.replies.insert(
            (Method::Get, url.to_owned()),
            Ok(ProbeReply::new(status, text)),
        );
        self
    }

    pub(crate) fn on_post(mut self, url: &str, status: u16, body: &Value) -> Self {
        self.replies.insert(
            (Method::Post, url.to_owned()),
            Ok(ProbeReply::new(status, body.to_string())),
        );
        self
    }

    pub(crate) fn fail_get(mut self, url: &str, error: TransportError) -> Self {
        self.replies.insert((Method::Get, url.to_owned()), Err(error));
        self
    }

    pub(crate) fn calls(&self) -> Vec<ProbeRequest> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub(crate) fn urls(&self, method: Method) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method)
            .map(|c| c.url)
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ProbeRequest) -> Result<ProbeReply, TransportError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(request.clone());

        // Anything not scripted behaves like a host that does not resolve.
        self.replies
            .get(&(request.method, request.url.clone()))
            .cloned()
            .unwrap_or_else(|| {
                Err(TransportError::Connect {
                    url: request.url,
                    message: "dns error: failed to lookup address information".to_owned(),
                })
            })
    }
}
