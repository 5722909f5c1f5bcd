//! Reads the token's granted scopes from `access_scopes.json`.

use crate::permissions::{Permission, PermissionSet};
use crate::transport::Transport;
use crate::types::{AccessScopesEnvelope, IntegrationResult};

use super::Prober;

impl<T: Transport> Prober<T> {
    /// Returns the permissions the scopes endpoint reports, or `None` when it
    /// could not be read. All granted handles land in `result.all_scopes`.
    pub(crate) async fn scan_scopes(
        &self,
        host: &str,
        result: &mut IntegrationResult,
    ) -> Option<PermissionSet> {
        let url = self.scopes_url(host);

        let reply = match self.get(&url).await {
            Ok(reply) => reply,
            Err(e) => {
                result.errors.push(format!("Error checking permissions: {e}"));
                return None;
            }
        };

        if reply.status != 200 {
            tracing::warn!(domain = %host, status = reply.status, "access scopes unavailable");
            result.errors.push(format!(
                "Access scopes request returned {}: {}",
                reply.status,
                reply.error_message()
            ));
            return None;
        }

        let envelope = match serde_json::from_str::<AccessScopesEnvelope>(&reply.text) {
            Ok(envelope) => envelope,
            Err(e) => {
                result.errors.push(format!(
                    "Error checking permissions: could not parse access scopes: {e}"
                ));
                return None;
            }
        };

        let handles: Vec<String> = envelope
            .access_scopes
            .into_iter()
            .map(|scope| scope.handle)
            .collect();
        let granted = PermissionSet::from_scopes(&handles);

        for permission in Permission::ALL {
            if granted.has(permission) {
                tracing::info!(scope = %permission, "permission granted");
            } else {
                tracing::info!(scope = %permission, "permission missing");
            }
        }

        result.all_scopes = handles;
        Some(granted)
    }
}
