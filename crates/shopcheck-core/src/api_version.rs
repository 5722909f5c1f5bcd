//! Shopify Admin API version strings.

/// Version requested when neither the environment nor the caller picks one.
pub const DEFAULT_API_VERSION: &str = "2023-10";

/// Returns `true` for `YYYY-MM` release strings and the literal `unstable`.
///
/// Only the shape is checked; whether Shopify still serves the release is
/// something the probe itself finds out.
#[must_use]
pub fn is_valid_api_version(version: &str) -> bool {
    if version == "unstable" {
        return true;
    }

    let Some((year, month)) = version.split_once('-') else {
        return false;
    };

    year.len() == 4
        && month.len() == 2
        && year.bytes().all(|b| b.is_ascii_digit())
        && month.bytes().all(|b| b.is_ascii_digit())
        && month
            .parse::<u8>()
            .is_ok_and(|m| (1..=12).contains(&m))
}
