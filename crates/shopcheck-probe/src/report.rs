//! Pass/fail verdict and the plain-text report for a finished check.

use std::fmt;

use crate::permissions::Permission;
use crate::types::{DiagnosticReport, IntegrationResult};

const RULE: &str = "==================================================";

/// Final judgement on an [`IntegrationResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    pub warnings: Vec<String>,
}

/// PASS needs a connection, the four core permissions and both test writes.
///
/// A passing `basic`-plan shop that lacks a basic-tier order scope still
/// passes, with a warning.
#[must_use]
pub fn verdict(result: &IntegrationResult) -> Verdict {
    let passed = result.connection
        && result.permissions.has_all(&Permission::CORE)
        && result.price_rule_creation
        && result.discount_code_creation;

    let mut warnings = Vec::new();
    let basic_plan = result
        .plan_name
        .as_deref()
        .is_some_and(|plan| plan.eq_ignore_ascii_case("basic"));
    if passed && basic_plan {
        let missing = result.permissions.missing(&Permission::BASIC_TIER);
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|p| p.as_str()).collect();
            warnings.push(format!(
                "Basic plan shop is missing basic-tier permissions: {}",
                names.join(", ")
            ));
        }
    }

    Verdict { passed, warnings }
}

/// Renders the human-readable summary of an integration check.
#[must_use]
pub fn render_summary(result: &IntegrationResult) -> String {
    Summary(result).to_string()
}

/// Renders the per-version table and outcome of a diagnostic run.
#[must_use]
pub fn render_diagnostic(report: &DiagnosticReport) -> String {
    Diagnostic(report).to_string()
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "[ok]  "
    } else {
        "[FAIL]"
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("unknown")
}

struct Summary<'a>(&'a IntegrationResult);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;

        writeln!(f, "{RULE}")?;
        writeln!(f, "SHOPIFY INTEGRATION CHECK")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Shop: {}", r.original_domain)?;
        writeln!(f, "API version: {}", r.api_version)?;
        writeln!(f, "Token: {}", r.token_kind.label())?;

        writeln!(f)?;
        if r.connection {
            writeln!(f, "CONNECTION: successful")?;
            writeln!(f, "  Store name: {}", or_unknown(r.shop_name.as_deref()))?;
            writeln!(f, "  Plan: {}", or_unknown(r.plan_name.as_deref()))?;
            writeln!(
                f,
                "  Connected domain: {}",
                or_unknown(r.connected_domain.as_deref())
            )?;
            if let Some(official) = &r.official_myshopify_domain {
                writeln!(f, "  Official myshopify domain: {official}")?;
            }
        } else {
            writeln!(f, "CONNECTION: failed")?;
            writeln!(f, "  Domains tried: {}", r.domains_tried.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "PERMISSIONS:")?;
        for permission in Permission::CORE {
            writeln!(f, "  {} {permission}", mark(r.permissions.has(permission)))?;
        }
        writeln!(f, "BASIC TIER PERMISSIONS:")?;
        for permission in Permission::BASIC_TIER {
            writeln!(f, "  {} {permission}", mark(r.permissions.has(permission)))?;
        }
        if !r.all_scopes.is_empty() {
            writeln!(f, "  Granted scopes: {}", r.all_scopes.join(", "))?;
        }

        if !r.endpoints.is_empty() {
            writeln!(f)?;
            writeln!(f, "ENDPOINTS:")?;
            for endpoint in &r.endpoints {
                writeln!(
                    f,
                    "  {} {} ({})",
                    mark(endpoint.status.is_ok()),
                    endpoint.name,
                    endpoint.status
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "OPERATIONS:")?;
        if r.price_rule_creation {
            writeln!(
                f,
                "  {} Price rule creation: {} (ID: {})",
                mark(true),
                or_unknown(r.price_rule_title.as_deref()),
                r.price_rule_id
                    .map_or_else(|| "unknown".to_owned(), |id| id.to_string())
            )?;
        } else {
            writeln!(f, "  {} Price rule creation", mark(false))?;
        }
        if r.discount_code_creation {
            writeln!(
                f,
                "  {} Discount code creation: {}",
                mark(true),
                or_unknown(r.discount_code.as_deref())
            )?;
        } else {
            writeln!(f, "  {} Discount code creation", mark(false))?;
        }
        if let Some(access) = r.orders_api_access {
            writeln!(f, "  {} Orders API access", mark(access))?;
        }

        if !r.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "ERRORS:")?;
            for (i, error) in r.errors.iter().enumerate() {
                writeln!(f, "  {}. {error}", i + 1)?;
            }
        }

        let verdict = verdict(r);
        writeln!(f)?;
        writeln!(f, "FINAL RESULT:")?;
        if verdict.passed {
            writeln!(f, "  PASS: all core functionality is working")?;
        } else {
            writeln!(f, "  FAIL: integration is not fully functional")?;
        }
        for warning in &verdict.warnings {
            writeln!(f, "  WARNING: {warning}")?;
        }

        writeln!(f)?;
        writeln!(f, "RECOMMENDED DOMAIN:")?;
        match r.recommended_domain() {
            Some(domain) => writeln!(f, "  {domain}")?,
            None => writeln!(f, "  could not determine the correct domain")?,
        }
        write!(f, "{RULE}")
    }
}

struct Diagnostic<'a>(&'a DiagnosticReport);

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "{RULE}")?;
        writeln!(f, "SHOPIFY API DIAGNOSTICS")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Shop: {}", report.original_domain)?;
        writeln!(f, "Host: {}", report.shop_domain)?;

        for version in &report.versions {
            writeln!(f)?;
            writeln!(
                f,
                "API {} ({})",
                version.api_version,
                if version.accessible {
                    "accessible"
                } else {
                    "no access"
                }
            )?;
            for endpoint in &version.endpoints {
                writeln!(
                    f,
                    "  {} {} ({})",
                    mark(endpoint.status.is_ok()),
                    endpoint.name,
                    endpoint.status
                )?;
                if !endpoint.status.is_ok() {
                    if let Some(detail) = endpoint.error.as_deref().or(endpoint.preview.as_deref())
                    {
                        writeln!(f, "         {detail}")?;
                    }
                }
            }
        }

        let summary = &report.summary;
        writeln!(f)?;
        writeln!(f, "SUMMARY:")?;
        writeln!(f, "  {}", summary.message)?;
        for (i, hypothesis) in summary.hypotheses.iter().enumerate() {
            writeln!(f, "  {}. {hypothesis}", i + 1)?;
        }
        write!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::PermissionSet;
    use crate::prober::summarize_diagnostics;
    use crate::types::{EndpointProbeResult, ProbeStatus, VersionDiagnostic};

    fn passing_result() -> IntegrationResult {
        let mut result = IntegrationResult::new("acme.com", "2023-10");
        result.connection = true;
        result.connected_domain = Some("acme.com".to_owned());
        result.official_myshopify_domain = Some("acme.myshopify.com".to_owned());
        result.working_domain = Some("acme.myshopify.com".to_owned());
        result.shop_name = Some("Acme".to_owned());
        result.plan_name = Some("shopify".to_owned());
        result.permissions = PermissionSet::from_scopes(&[
            "read_price_rules",
            "write_price_rules",
            "read_discounts",
            "write_discounts",
        ]);
        result.price_rule_creation = true;
        result.price_rule_id = Some(1001);
        result.price_rule_title = Some("SHOPCHECK_TEST_1".to_owned());
        result.discount_code_creation = true;
        result.discount_code = Some("SHOPCHECK_TEST_1".to_owned());
        result
    }

    #[test]
    fn verdict_passes_with_core_permissions_and_both_writes() {
        let verdict = verdict(&passing_result());
        assert!(verdict.passed);
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn verdict_fails_without_discount_code() {
        let mut result = passing_result();
        result.discount_code_creation = false;
        assert!(!verdict(&result).passed);
    }

    #[test]
    fn verdict_fails_without_core_permission() {
        let mut result = passing_result();
        result.permissions.read_discounts = false;
        assert!(!verdict(&result).passed);
    }

    #[test]
    fn basic_plan_missing_order_scopes_warns() {
        let mut result = passing_result();
        result.plan_name = Some("basic".to_owned());
        result.permissions.read_orders = true;

        let verdict = verdict(&result);
        assert!(verdict.passed);
        assert_eq!(verdict.warnings.len(), 1);
        assert!(verdict.warnings[0].contains("read_all_orders"));
        assert!(!verdict.warnings[0].contains("read_orders,"));
    }

    #[test]
    fn basic_plan_match_ignores_case() {
        let mut result = passing_result();
        result.plan_name = Some("Basic".to_owned());

        let verdict = verdict(&result);
        assert!(verdict.passed);
        assert_eq!(verdict.warnings.len(), 1);
        assert!(verdict.warnings[0].contains("read_orders, read_all_orders"));
    }

    #[test]
    fn summary_reports_pass_and_official_domain() {
        let text = render_summary(&passing_result());
        assert!(text.contains("CONNECTION: successful"));
        assert!(text.contains("Official myshopify domain: acme.myshopify.com"));
        assert!(text.contains("Price rule creation: SHOPCHECK_TEST_1 (ID: 1001)"));
        assert!(text.contains("PASS"));
        assert!(text.contains("RECOMMENDED DOMAIN:\n  acme.myshopify.com"));
        assert!(!text.contains("ERRORS:"));
    }

    #[test]
    fn summary_for_failed_connection_lists_domains_and_errors() {
        let mut result = IntegrationResult::new("acme.com", "2023-10");
        result.domains_tried = vec!["acme.com".to_owned(), "acme.myshopify.com".to_owned()];
        result
            .errors
            .push("Could not establish connection with any domain format".to_owned());

        let text = render_summary(&result);
        assert!(text.contains("CONNECTION: failed"));
        assert!(text.contains("Domains tried: acme.com, acme.myshopify.com"));
        assert!(text.contains("  1. Could not establish connection"));
        assert!(text.contains("FAIL: integration is not fully functional"));
        assert!(text.contains("could not determine the correct domain"));
    }

    #[test]
    fn diagnostic_report_shows_each_version_and_summary() {
        let versions = vec![VersionDiagnostic {
            api_version: "2023-10".to_owned(),
            accessible: false,
            endpoints: vec![EndpointProbeResult {
                name: "Shop Info".to_owned(),
                url: "https://acme.myshopify.com/admin/api/2023-10/shop.json".to_owned(),
                status: ProbeStatus::Http(401),
                summary: None,
                error: Some("Invalid API key".to_owned()),
                preview: None,
            }],
        }];
        let report = DiagnosticReport {
            original_domain: "acme".to_owned(),
            shop_domain: "acme.myshopify.com".to_owned(),
            summary: summarize_diagnostics(&versions),
            versions,
        };

        let text = render_diagnostic(&report);
        assert!(text.contains("API 2023-10 (no access)"));
        assert!(text.contains("Shop Info (401)"));
        assert!(text.contains("Invalid API key"));
        assert!(text.contains("  3. "));
    }
}
