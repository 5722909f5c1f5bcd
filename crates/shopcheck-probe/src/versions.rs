//! Admin API versions the check walks through.

pub use shopcheck_core::DEFAULT_API_VERSION;

/// Tried in order when the requested version cannot connect on any host.
pub const FALLBACK_API_VERSIONS: [&str; 3] = ["2024-01", "2023-07", "2024-04"];

/// Probed after the requested version in diagnostic mode.
pub const DIAGNOSTIC_API_VERSIONS: [&str; 3] = ["2024-01", "2023-10", "2023-07"];

/// Fallback versions to try after `requested` failed, excluding `requested`.
pub fn fallback_versions(requested: &str) -> impl Iterator<Item = &'static str> + '_ {
    FALLBACK_API_VERSIONS
        .into_iter()
        .filter(move |v| *v != requested)
}

/// `requested` first, then the diagnostic list, without repeats.
#[must_use]
pub fn diagnostic_versions(requested: &str) -> Vec<String> {
    let mut versions = vec![requested.to_owned()];
    for version in DIAGNOSTIC_API_VERSIONS {
        if !versions.iter().any(|v| v == version) {
            versions.push(version.to_owned());
        }
    }
    versions
}
