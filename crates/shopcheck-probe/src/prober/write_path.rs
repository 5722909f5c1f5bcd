//! Proves write access by creating a price rule and a discount code for it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::transport::Transport;
use crate::types::{DiscountCodeEnvelope, IntegrationResult, PriceRuleEnvelope};

use super::Prober;

/// Body for `POST price_rules.json`: 10% off every line item, usable once.
#[must_use]
pub fn price_rule_payload(title: &str, starts_at: DateTime<Utc>) -> Value {
    json!({
        "price_rule": {
            "title": title,
            "target_type": "line_item",
            "target_selection": "all",
            "allocation_method": "across",
            "value_type": "percentage",
            "value": "-10.0",
            "customer_selection": "all",
            "starts_at": starts_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            "usage_limit": 1,
            "once_per_customer": true
        }
    })
}

/// Body for `POST price_rules/{id}/discount_codes.json`.
#[must_use]
pub fn discount_code_payload(code: &str) -> Value {
    json!({ "discount_code": { "code": code } })
}

impl<T: Transport> Prober<T> {
    /// Creates a test price rule, then a discount code bound to it.
    ///
    /// Runs only with `write_price_rules`; the code is only attempted with
    /// `write_discounts` and a rule id from the first call. Both share the
    /// `{prefix}_{unix seconds}` token so repeated runs do not collide.
    pub(crate) async fn exercise_write_path(
        &self,
        host: &str,
        api_version: &str,
        now: DateTime<Utc>,
        result: &mut IntegrationResult,
    ) {
        if !result.permissions.write_price_rules {
            return;
        }

        let token = format!("{}_{}", self.test_code_prefix, now.timestamp());
        let url = self.admin_url(host, api_version, "price_rules.json");

        let reply = match self.post(&url, price_rule_payload(&token, now)).await {
            Ok(reply) => reply,
            Err(e) => {
                result.errors.push(format!("Error creating price rule: {e}"));
                return;
            }
        };

        if !reply.is_success() {
            tracing::warn!(status = reply.status, "price rule creation failed");
            result.errors.push(format!(
                "Price rule creation failed ({}): {}",
                reply.status, reply.text
            ));
            return;
        }

        let rule = serde_json::from_str::<PriceRuleEnvelope>(&reply.text)
            .map(|envelope| envelope.price_rule)
            .unwrap_or_default();
        result.price_rule_creation = true;
        result.price_rule_id = rule.id;
        result.price_rule_title = rule.title;
        tracing::info!(price_rule_id = ?rule.id, "price rule created");

        if !result.permissions.write_discounts {
            return;
        }

        let Some(rule_id) = rule.id else {
            result
                .errors
                .push("Price rule created but no id was returned; skipping discount code".to_owned());
            return;
        };

        let url = self.admin_url(
            host,
            api_version,
            &format!("price_rules/{rule_id}/discount_codes.json"),
        );

        let reply = match self.post(&url, discount_code_payload(&token)).await {
            Ok(reply) => reply,
            Err(e) => {
                result.errors.push(format!("Error creating discount code: {e}"));
                return;
            }
        };

        if !reply.is_success() {
            tracing::warn!(status = reply.status, "discount code creation failed");
            result.errors.push(format!(
                "Discount code creation failed ({}): {}",
                reply.status, reply.text
            ));
            return;
        }

        let code = serde_json::from_str::<DiscountCodeEnvelope>(&reply.text)
            .map(|envelope| envelope.discount_code)
            .unwrap_or_default();
        result.discount_code_creation = true;
        result.discount_code = code.code;
        result.discount_code_id = code.id;
        tracing::info!(discount_code_id = ?code.id, "discount code created");
    }
}
