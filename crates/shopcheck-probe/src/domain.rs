//! Shop identifier normalisation and myshopify host guessing.
//!
//! Merchants rarely know their `*.myshopify.com` host; they paste whatever
//! is in their browser bar. [`generate_candidates`] turns that into an
//! ordered list of hosts worth dialing. Everything here is pure string work.

use std::collections::HashSet;

pub const MYSHOPIFY_SUFFIX: &str = ".myshopify.com";

/// Reduces a shop identifier to a lowercase `host[:port]`.
///
/// Drops any `scheme://` prefix, path, query, and fragment. Given
/// `"https://My-Store.com/collections/all"`, returns `"my-store.com"`.
///
/// Hostnames are case-insensitive, so the as-given candidate is the
/// lowercased host: `Acme.myshopify.com` is dialed as `acme.myshopify.com`.
#[must_use]
pub fn extract_host(shop_url: &str) -> String {
    let trimmed = shop_url.trim();

    let without_scheme = if trimmed.contains("://") {
        reqwest::Url::parse(trimmed)
            .ok()
            .and_then(|u| {
                u.host_str().map(|host| match u.port() {
                    Some(port) => format!("{host}:{port}"),
                    None => host.to_owned(),
                })
            })
            .unwrap_or_else(|| {
                trimmed
                    .split_once("://")
                    .map_or(trimmed, |(_, rest)| rest)
                    .to_owned()
            })
    } else {
        trimmed.to_owned()
    };

    without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Best single guess at the myshopify host for an already-extracted host.
///
/// - `name.myshopify.com` is returned as-is.
/// - `name.myshopify` gains the missing `.com`.
/// - Anything else becomes `{first label}.myshopify.com`, skipping a leading `www`.
#[must_use]
pub fn myshopify_domain(host: &str) -> String {
    if host.contains(MYSHOPIFY_SUFFIX) {
        return host.to_owned();
    }

    if host.contains(".myshopify") {
        return host.replacen(".myshopify", MYSHOPIFY_SUFFIX, 1);
    }

    let mut labels = host.split('.');
    let first = labels.next().unwrap_or_default();
    let store = if first == "www" {
        labels.next().unwrap_or(first)
    } else {
        first
    };

    format!("{store}{MYSHOPIFY_SUFFIX}")
}

/// Normalises a raw shop identifier straight to one myshopify host, with no
/// candidate search. Used by diagnostic mode.
#[must_use]
pub fn normalize_shop_domain(shop_url: &str) -> String {
    myshopify_domain(&extract_host(shop_url))
}

/// Derives the bare store name from a host.
///
/// `mystore.myshopify.com`, `mystore.myshopify` and `mystore.com` all give
/// `mystore`; other hosts give their first label. Leftover `.myshopify` or
/// `.com` fragments are removed afterwards so doubled suffixes collapse.
#[must_use]
pub fn base_name(host: &str) -> String {
    let base = if host.contains(MYSHOPIFY_SUFFIX) {
        host.replace(MYSHOPIFY_SUFFIX, "")
    } else if host.contains(".myshopify") {
        host.replace(".myshopify", "")
    } else if let Some(stripped) = host.strip_suffix(".com") {
        stripped.to_owned()
    } else if let Some((first, _)) = host.split_once('.') {
        first.to_owned()
    } else {
        host.to_owned()
    };

    base.replace(".myshopify", "").replace(".com", "")
}

/// Builds the ordered, de-duplicated list of hosts to try for a shop.
///
/// Generation order is: the host as given, its [`myshopify_domain`], then
/// `{base}.myshopify.com`, the `_`→`-` and `-`→`_` variants, the base without
/// a leading `get`, and the base with a leading `my`. Duplicates keep their
/// first position, so the result is deterministic.
#[must_use]
pub fn generate_candidates(shop_url: &str) -> Vec<String> {
    let host = extract_host(shop_url);
    if host.is_empty() {
        return Vec::new();
    }

    let base = base_name(&host);
    let mut candidates = vec![
        host.clone(),
        myshopify_domain(&host),
        format!("{base}{MYSHOPIFY_SUFFIX}"),
        format!("{}{MYSHOPIFY_SUFFIX}", base.replace('_', "-")),
        format!("{}{MYSHOPIFY_SUFFIX}", base.replace('-', "_")),
    ];

    if let Some(without_get) = base.strip_prefix("get") {
        candidates.push(format!("{without_get}{MYSHOPIFY_SUFFIX}"));
    }
    if !base.starts_with("my") {
        candidates.push(format!("my{base}{MYSHOPIFY_SUFFIX}"));
    }

    // A candidate starting with '.' came from an empty base and has no store label.
    let mut seen = HashSet::new();
    candidates.retain(|c| !c.trim().is_empty() && !c.starts_with('.') && seen.insert(c.clone()));
    candidates
}

#[cfg(test)]
#[path = "domain_test.rs"]
mod tests;
