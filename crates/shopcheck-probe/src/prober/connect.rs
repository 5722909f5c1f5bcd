//! Finds the first candidate host that answers `shop.json`.

use crate::error::TransportError;
use crate::transport::{ProbeReply, Transport};
use crate::types::{IntegrationResult, ShopDetails, ShopEnvelope};

use super::Prober;

impl<T: Transport> Prober<T> {
    /// Dials each candidate in order and stops at the first 200.
    ///
    /// Returns the host to use from here on: the store's declared
    /// `myshopify_domain` when the body has one, otherwise the candidate
    /// that answered. Every failed candidate leaves an entry in
    /// `result.errors`.
    pub(crate) async fn connect(
        &self,
        candidates: &[String],
        api_version: &str,
        result: &mut IntegrationResult,
    ) -> Option<String> {
        for candidate in candidates {
            let url = self.admin_url(candidate, api_version, "shop.json");

            match self.get(&url).await {
                Ok(reply) if reply.status == 200 => {
                    tracing::info!(domain = %candidate, api_version, "connection successful");
                    return Some(record_connection(candidate, &reply, result));
                }
                Ok(reply) => {
                    tracing::warn!(domain = %candidate, status = reply.status, "connection failed");
                    let hint = status_hint(reply.status)
                        .map(|h| format!(" ({h})"))
                        .unwrap_or_default();
                    result.errors.push(format!(
                        "Connection failed with domain {candidate} (status {}): {}{hint}",
                        reply.status,
                        reply.error_message()
                    ));
                }
                Err(TransportError::Connect { .. }) => {
                    tracing::warn!(domain = %candidate, "domain did not resolve");
                    result.errors.push(format!(
                        "Connection failed with domain {candidate} (domain resolution error)"
                    ));
                }
                Err(e @ TransportError::Request { .. }) => {
                    tracing::warn!(domain = %candidate, error = %e, "request failed");
                    result.errors.push(format!(
                        "Connection failed with domain {candidate} (request error: {e})"
                    ));
                }
            }
        }

        None
    }
}

fn record_connection(candidate: &str, reply: &ProbeReply, result: &mut IntegrationResult) -> String {
    result.connection = true;
    result.connected_domain = Some(candidate.to_owned());

    let shop = match serde_json::from_str::<ShopEnvelope>(&reply.text) {
        Ok(envelope) => envelope.shop,
        Err(e) => {
            result
                .errors
                .push(format!("Could not parse shop details from {candidate}: {e}"));
            ShopDetails::default()
        }
    };

    result.shop_name = shop.name;
    result.plan_name = shop.plan_name;
    result.myshopify_domain.clone_from(&shop.myshopify_domain);

    let working = match shop.myshopify_domain.filter(|d| !d.trim().is_empty()) {
        Some(official) => {
            if official != candidate {
                tracing::info!(domain = %official, dialed = %candidate, "using official myshopify domain");
            }
            result.official_myshopify_domain = Some(official.clone());
            official
        }
        None => candidate.to_owned(),
    };

    result.working_domain = Some(working.clone());
    working
}

/// A troubleshooting hint for a failed `shop.json` status.
fn status_hint(status: u16) -> Option<&'static str> {
    match status {
        401 => Some("the access token may be invalid or expired"),
        403 => Some("the access token lacks a required scope"),
        404 => Some("the store URL may be wrong; try the .myshopify.com domain"),
        500..=599 => Some("the Shopify API may be having problems; try again later"),
        _ => None,
    }
}
