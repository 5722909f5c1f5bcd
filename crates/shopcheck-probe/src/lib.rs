pub mod domain;
pub mod endpoints;
pub mod error;
pub mod permissions;
pub mod prober;
pub mod report;
pub mod transport;
pub mod types;
pub mod versions;

#[cfg(test)]
mod test_support;

pub use domain::{generate_candidates, normalize_shop_domain};
pub use error::{ProbeError, TransportError};
pub use permissions::{merge_permissions, Permission, PermissionSet};
pub use prober::Prober;
pub use report::{render_diagnostic, render_summary, verdict, Verdict};
pub use transport::{Method, ProbeReply, ProbeRequest, ReqwestTransport, Transport};
pub use types::{
    DiagnosticOutcome, DiagnosticReport, DiagnosticSummary, EndpointProbeResult, IntegrationResult,
    ProbeStatus, TokenKind, VersionDiagnostic,
};
pub use versions::{DEFAULT_API_VERSION, DIAGNOSTIC_API_VERSIONS, FALLBACK_API_VERSIONS};
