//! Diagnostic mode: the endpoint battery across several API versions
//! against one normalised host, with no writes.

use crate::domain::normalize_shop_domain;
use crate::endpoints::reads_orders;
use crate::permissions::Permission;
use crate::transport::Transport;
use crate::types::{DiagnosticOutcome, DiagnosticReport, DiagnosticSummary, VersionDiagnostic};
use crate::versions::diagnostic_versions;

use super::Prober;

impl<T: Transport> Prober<T> {
    pub async fn run_diagnostics(&self, shop_url: &str, api_version: &str) -> DiagnosticReport {
        let shop_domain = normalize_shop_domain(shop_url);
        let mut versions = Vec::new();

        for version in diagnostic_versions(api_version) {
            let battery = self.run_battery(&shop_domain, &version).await;
            let accessible = battery.results.iter().any(|r| r.status.is_ok());
            tracing::info!(domain = %shop_domain, api_version = %version, accessible, "diagnostic pass finished");
            versions.push(VersionDiagnostic {
                api_version: version,
                accessible,
                endpoints: battery.results,
            });
        }

        let summary = summarize_diagnostics(&versions);
        DiagnosticReport {
            original_domain: shop_url.to_owned(),
            shop_domain,
            versions,
            summary,
        }
    }
}

/// Classifies per-version results into one of three outcomes.
#[must_use]
pub fn summarize_diagnostics(versions: &[VersionDiagnostic]) -> DiagnosticSummary {
    let working_versions: Vec<String> = versions
        .iter()
        .filter(|v| v.accessible)
        .map(|v| v.api_version.clone())
        .collect();

    if working_versions.is_empty() {
        return DiagnosticSummary {
            outcome: DiagnosticOutcome::NoAccess,
            message: "No endpoints were accessible on any API version.".to_owned(),
            hypotheses: vec![
                "The access token is invalid or has been revoked.".to_owned(),
                "The app's API access is restricted to specific IP addresses.".to_owned(),
                "The shop domain is wrong; confirm the store's .myshopify.com address.".to_owned(),
            ],
            working_versions,
            missing_scope: None,
        };
    }

    let can_read_orders = versions
        .iter()
        .flat_map(|v| &v.endpoints)
        .any(|e| reads_orders(&e.name) && e.status.is_ok());

    if can_read_orders {
        DiagnosticSummary {
            outcome: DiagnosticOutcome::AccessWithOrders,
            message: format!(
                "Endpoints are accessible and orders can be read (API versions: {}).",
                working_versions.join(", ")
            ),
            hypotheses: Vec::new(),
            working_versions,
            missing_scope: None,
        }
    } else {
        let scope = Permission::ReadOrders.as_str();
        DiagnosticSummary {
            outcome: DiagnosticOutcome::AccessWithoutOrders,
            message: format!(
                "Endpoints are accessible but orders cannot be read; the token is missing the {scope} scope."
            ),
            hypotheses: Vec::new(),
            working_versions,
            missing_scope: Some(scope.to_owned()),
        }
    }
}
