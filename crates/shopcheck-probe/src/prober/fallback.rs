//! The full check for one API version, and the walk across fallback versions.

use chrono::{DateTime, Utc};

use crate::domain::generate_candidates;
use crate::endpoints::ORDERS;
use crate::permissions::merge_permissions;
use crate::transport::Transport;
use crate::types::{IntegrationResult, TokenKind};
use crate::versions::fallback_versions;

use super::Prober;

impl<T: Transport> Prober<T> {
    /// Checks a shop's integration, falling back across API versions.
    ///
    /// If `api_version` connects on no candidate host, each fallback version
    /// is tried in turn and the first one that connects is returned whole.
    /// If none does, the result for `api_version` comes back with a note per
    /// failed fallback appended to its errors.
    pub async fn check_integration(&self, shop_url: &str, api_version: &str) -> IntegrationResult {
        self.check_integration_at(shop_url, api_version, Utc::now())
            .await
    }

    /// [`Self::check_integration`] with an explicit clock for the write-path
    /// timestamp.
    pub async fn check_integration_at(
        &self,
        shop_url: &str,
        api_version: &str,
        now: DateTime<Utc>,
    ) -> IntegrationResult {
        let mut primary = self.check_version(shop_url, api_version, now).await;
        if primary.connection {
            return primary;
        }

        for version in fallback_versions(api_version) {
            tracing::info!(api_version = version, "retrying with fallback API version");
            let attempt = self.check_version(shop_url, version, now).await;
            if attempt.connection {
                return attempt;
            }
            primary
                .errors
                .push(format!("Fallback API version {version} also failed to connect"));
        }

        primary
    }

    /// Candidate search, scopes, endpoint battery and write path for one
    /// API version. Never retries another version.
    pub async fn check_version(
        &self,
        shop_url: &str,
        api_version: &str,
        now: DateTime<Utc>,
    ) -> IntegrationResult {
        let mut result = IntegrationResult::new(shop_url, api_version);
        result.token_kind = TokenKind::from_token(&self.access_token);

        let candidates = generate_candidates(shop_url);
        result.domains_tried.clone_from(&candidates);

        let Some(host) = self.connect(&candidates, api_version, &mut result).await else {
            tracing::warn!(api_version, tried = candidates.len(), "no candidate domain connected");
            result
                .errors
                .push("Could not establish connection with any domain format".to_owned());
            return result;
        };

        let granted = self.scan_scopes(&host, &mut result).await;

        let battery = self.run_battery(&host, api_version).await;
        result.errors.extend(battery.errors);
        result.endpoints = battery.results;
        result.permissions = merge_permissions(battery.inferred, granted);

        if result.permissions.can_read_orders() {
            result.orders_api_access =
                Some(result.endpoint(ORDERS).is_some_and(|e| e.status.is_ok()));
        }

        self.exercise_write_path(&host, api_version, now, &mut result)
            .await;

        result
    }
}
