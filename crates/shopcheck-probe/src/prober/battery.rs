//! Walks the fixed endpoint battery against one host and version.

use crate::endpoints::{EndpointSpec, ENDPOINTS};
use crate::permissions::PermissionSet;
use crate::transport::Transport;
use crate::types::{EndpointProbeResult, ProbeStatus};

use super::Prober;

/// What one pass over [`ENDPOINTS`] produced.
#[derive(Debug, Default)]
pub(crate) struct BatteryRun {
    pub(crate) results: Vec<EndpointProbeResult>,
    /// Permissions proven by endpoints that answered 200.
    pub(crate) inferred: PermissionSet,
    pub(crate) errors: Vec<String>,
}

impl<T: Transport> Prober<T> {
    /// Probes every endpoint in order; a failure never stops the rest.
    pub(crate) async fn run_battery(&self, host: &str, api_version: &str) -> BatteryRun {
        let mut run = BatteryRun::default();
        for spec in &ENDPOINTS {
            let result = self.probe_endpoint(host, api_version, spec, &mut run).await;
            run.results.push(result);
        }
        run
    }

    async fn probe_endpoint(
        &self,
        host: &str,
        api_version: &str,
        spec: &EndpointSpec,
        run: &mut BatteryRun,
    ) -> EndpointProbeResult {
        let url = self.admin_url(host, api_version, spec.resource);

        let reply = match self.get(&url).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(endpoint = spec.name, error = %e, "endpoint probe errored");
                run.errors.push(format!("Error probing {}: {e}", spec.name));
                return EndpointProbeResult {
                    name: spec.name.to_owned(),
                    url,
                    status: ProbeStatus::Error,
                    summary: None,
                    error: Some(e.to_string()),
                    preview: None,
                };
            }
        };

        let (summary, error) = if reply.status == 200 {
            if let Some(permission) = spec.kind.inferred_permission() {
                run.inferred.grant(permission);
            }
            tracing::debug!(endpoint = spec.name, "endpoint accessible");
            (reply.json().and_then(|body| spec.kind.summarize(&body)), None)
        } else {
            let message = reply.error_message();
            tracing::warn!(endpoint = spec.name, status = reply.status, "endpoint probe failed");
            run.errors.push(format!(
                "{} endpoint returned {}: {message}",
                spec.name, reply.status
            ));
            (None, Some(message))
        };

        EndpointProbeResult {
            name: spec.name.to_owned(),
            url,
            status: ProbeStatus::Http(reply.status),
            summary,
            error,
            preview: Some(reply.preview()),
        }
    }
}
